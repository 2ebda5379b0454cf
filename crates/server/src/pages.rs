//! Public portfolio pages.
//!
//! Server-rendered HTML over the same repository the PDF pipeline
//! reads. The profile context is filtered through the privacy
//! switches before it reaches a template; templates never see data
//! the owner chose to hide.

use handlebars::Handlebars;
use serde_json::{Value, json};
use vitae_model::{ContentRepository, Profile};

const HEADER: &str = r##"<header>
  <h1><a href="/">{{#if profile}}{{profile.first_name}} {{profile.last_name}}{{else}}Curriculum{{/if}}</a></h1>
  <nav>
    <a href="/experiencia">Experience</a>
    <a href="/educacion">Education</a>
    <a href="/reconocimientos">Recognitions</a>
    <a href="/proyectos">Projects</a>
    <a href="/venta">For Sale</a>
    <a href="/cv/pdf">Download CV</a>
  </nav>
</header>"##;

const HOME: &str = r##"<html>
<head><title>{{title}}</title><link rel="stylesheet" href="/static/site.css"/></head>
<body>
{{> header}}
<main>
  {{#if profile}}
  {{#if profile.photo}}<img src="{{profile.photo}}" alt="photo"/>{{/if}}
  {{#if profile.bio}}<p>{{profile.bio}}</p>{{/if}}
  <ul>
    <li>{{profile.email}}</li>
    {{#if profile.phone}}<li>{{profile.phone}}</li>{{/if}}
    {{#if profile.home_address}}<li>{{profile.home_address}}</li>{{/if}}
    {{#if profile.website}}<li><a href="{{profile.website}}">{{profile.website}}</a></li>{{/if}}
    {{#if profile.linkedin_url}}<li><a href="{{profile.linkedin_url}}">LinkedIn</a></li>{{/if}}
    {{#if profile.github_url}}<li><a href="{{profile.github_url}}">GitHub</a></li>{{/if}}
  </ul>
  {{else}}
  <p>No profile has been published yet.</p>
  {{/if}}
</main>
</body>
</html>"##;

const EXPERIENCE: &str = r##"<html>
<head><title>{{title}}</title><link rel="stylesheet" href="/static/site.css"/></head>
<body>
{{> header}}
<main>
  <h2>Work Experience</h2>
  {{#each experience}}
  <article>
    <h3>{{position}} - {{company}}</h3>
    <p>{{start_date}}{{#if end_date}} to {{end_date}}{{else}} to date{{/if}} | {{location}}</p>
    <p>{{description}}</p>
  </article>
  {{/each}}
</main>
</body>
</html>"##;

const EDUCATION: &str = r##"<html>
<head><title>{{title}}</title><link rel="stylesheet" href="/static/site.css"/></head>
<body>
{{> header}}
<main>
  <h2>Education</h2>
  {{#each education}}
  <article>
    <h3>{{degree}}</h3>
    <p>{{institution}}, {{start_date}}{{#if end_date}} to {{end_date}}{{else}} (ongoing){{/if}}</p>
  </article>
  {{/each}}
  <h2>Courses and Training</h2>
  {{#each courses}}
  <article>
    <h3>{{name}}</h3>
    <p>{{institution}} | {{hours}} academic hours | {{completed_on}}</p>
  </article>
  {{/each}}
</main>
</body>
</html>"##;

const RECOGNITIONS: &str = r##"<html>
<head><title>{{title}}</title><link rel="stylesheet" href="/static/site.css"/></head>
<body>
{{> header}}
<main>
  <h2>Recognitions and Awards</h2>
  {{#each recognitions}}
  <article>
    <h3>{{name}}</h3>
    <p>{{institution}} | {{awarded_on}}{{#if registry_code}} | Reg. {{registry_code}}{{/if}}</p>
  </article>
  {{/each}}
  <h2>Academic Products</h2>
  {{#each academic_products}}
  <article>
    <h3>{{title}}</h3>
    <p>{{publisher}} | {{published_on}}{{#if url}} | <a href="{{url}}">link</a>{{/if}}</p>
  </article>
  {{/each}}
</main>
</body>
</html>"##;

const PROJECTS: &str = r##"<html>
<head><title>{{title}}</title><link rel="stylesheet" href="/static/site.css"/></head>
<body>
{{> header}}
<main>
  <h2>Projects</h2>
  {{#each projects}}
  <article>
    <h3>{{name}}</h3>
    <p>{{date}}{{#if registry_id}} | {{registry_id}}{{/if}}{{#if demo_url}} | <a href="{{demo_url}}">demo</a>{{/if}}</p>
    <p>{{description}}</p>
  </article>
  {{/each}}
</main>
</body>
</html>"##;

const SALE: &str = r##"<html>
<head><title>{{title}}</title><link rel="stylesheet" href="/static/site.css"/></head>
<body>
{{> header}}
<main>
  <h2>Items for Sale</h2>
  {{#each sale_items}}
  <article>
    {{#if image}}<img src="{{image}}" alt="{{name}}"/>{{/if}}
    <h3>{{name}}</h3>
    <p>${{price}} | condition: {{condition}} | stock: {{stock}}</p>
    <p>{{description}}</p>
  </article>
  {{/each}}
</main>
</body>
</html>"##;

/// One value per public page route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicPage {
    Home,
    Experience,
    Education,
    Recognitions,
    Projects,
    Sale,
}

impl PublicPage {
    fn template_name(self) -> &'static str {
        match self {
            PublicPage::Home => "home",
            PublicPage::Experience => "experience",
            PublicPage::Education => "education",
            PublicPage::Recognitions => "recognitions",
            PublicPage::Projects => "projects",
            PublicPage::Sale => "sale",
        }
    }
}

pub struct PageRenderer {
    registry: Handlebars<'static>,
}

impl PageRenderer {
    pub fn new() -> Result<Self, handlebars::TemplateError> {
        let mut registry = Handlebars::new();
        registry.register_partial("header", HEADER)?;
        registry.register_template_string("home", HOME)?;
        registry.register_template_string("experience", EXPERIENCE)?;
        registry.register_template_string("education", EDUCATION)?;
        registry.register_template_string("recognitions", RECOGNITIONS)?;
        registry.register_template_string("projects", PROJECTS)?;
        registry.register_template_string("sale", SALE)?;
        Ok(Self { registry })
    }

    pub fn render(
        &self,
        page: PublicPage,
        repository: &dyn ContentRepository,
    ) -> Result<String, handlebars::RenderError> {
        let profile = repository.profile();
        let title = profile
            .as_ref()
            .map(Profile::full_name)
            .unwrap_or_else(|| "Curriculum".to_string());
        let mut data = serde_json::Map::new();
        data.insert("title".into(), json!(title));
        data.insert(
            "profile".into(),
            profile.map(|p| public_profile(&p)).unwrap_or(Value::Null),
        );
        match page {
            PublicPage::Home => {}
            PublicPage::Experience => {
                data.insert("experience".into(), to_value(repository.experience()));
            }
            PublicPage::Education => {
                data.insert("education".into(), to_value(repository.education()));
                data.insert("courses".into(), to_value(repository.courses()));
            }
            PublicPage::Recognitions => {
                data.insert("recognitions".into(), to_value(repository.recognitions()));
                data.insert(
                    "academic_products".into(),
                    to_value(repository.academic_products()),
                );
            }
            PublicPage::Projects => {
                data.insert("projects".into(), to_value(repository.projects()));
            }
            PublicPage::Sale => {
                data.insert("sale_items".into(), to_value(repository.sale_items()));
            }
        }

        self.registry
            .render(page.template_name(), &Value::Object(data))
    }
}

fn to_value<T: serde::Serialize>(items: Vec<T>) -> Value {
    serde_json::to_value(items).unwrap_or(Value::Array(Vec::new()))
}

/// Applies the profile's privacy switches: hidden fields are removed
/// from the context entirely.
fn public_profile(profile: &Profile) -> Value {
    let mut value = serde_json::to_value(profile).unwrap_or(Value::Null);
    if let Some(fields) = value.as_object_mut() {
        if !profile.show_phone {
            fields.remove("phone");
            fields.remove("landline");
        }
        if !profile.show_home_address {
            fields.remove("home_address");
        }
        // Never exposed on public pages.
        fields.remove("id_number");
        fields.remove("birth_date");
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitae_model::InMemoryRepository;

    fn repo(show_phone: bool) -> InMemoryRepository {
        InMemoryRepository::from_json(&format!(
            r#"{{
                "profiles": [{{
                    "id_number": "1712345678",
                    "first_name": "Ana",
                    "last_name": "Mora",
                    "phone": "0991234567",
                    "email": "ana@example.com",
                    "home_address": "Calle Falsa 123",
                    "show_phone": {show_phone}
                }}],
                "experience": [
                    {{"position": "Engineer", "company": "Acme", "start_date": "2020-01-01"}}
                ]
            }}"#
        ))
        .unwrap()
    }

    #[test]
    fn test_home_page_respects_privacy_switches() {
        let renderer = PageRenderer::new().unwrap();

        let html = renderer.render(PublicPage::Home, &repo(true)).unwrap();
        assert!(html.contains("0991234567"));
        // Home address defaults to hidden.
        assert!(!html.contains("Calle Falsa"));
        assert!(!html.contains("1712345678"));

        let html = renderer.render(PublicPage::Home, &repo(false)).unwrap();
        assert!(!html.contains("0991234567"));
    }

    #[test]
    fn test_experience_page_lists_entries() {
        let renderer = PageRenderer::new().unwrap();
        let html = renderer.render(PublicPage::Experience, &repo(true)).unwrap();
        assert!(html.contains("Engineer - Acme"));
    }

    #[test]
    fn test_pages_render_without_a_profile() {
        let renderer = PageRenderer::new().unwrap();
        let repo = InMemoryRepository::from_json("{}").unwrap();
        let html = renderer.render(PublicPage::Home, &repo).unwrap();
        assert!(html.contains("No profile has been published yet."));
    }
}
