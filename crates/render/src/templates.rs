//! Embedded handlebars sources for the four CV section modes.
//!
//! Layout is deliberately plain: the pipeline cares about section
//! structure and ordering, not typography. Colors and the font stack
//! come from the per-request style options.

/// Profile header plus experience and education. Always rendered, even
/// with both collections empty, so the document always has a page 1.
pub(crate) const TOP: &str = r##"<html>
<body style="font-family: {{styles.font_family}};">
  {{#if profile}}
  <h1>
    <span style="color: {{styles.name_color}};">{{profile.first_name}}</span>
    <span style="color: {{styles.surname_color}};">{{profile.last_name}}</span>
  </h1>
  {{#if styles.show_photo}}{{#if profile.photo}}<img src="{{profile.photo}}" alt="photo"/>{{/if}}{{/if}}
  <p style="color: {{styles.accent_color}};">{{profile.email}} - {{profile.phone}}</p>
  {{#if profile.bio}}<p>{{profile.bio}}</p>{{/if}}
  {{else}}
  <h1>Curriculum</h1>
  {{/if}}
  <hr style="border-color: {{styles.line_color}};"/>

  <h2 style="color: {{styles.header_color}};">Work Experience</h2>
  {{#each experience}}
  <div>
    <h3 style="color: {{../styles.accent_color}};">{{position}} - {{company}}</h3>
    <p>{{start_date}}{{#if end_date}} to {{end_date}}{{else}} to date{{/if}} | {{location}}</p>
    <p>{{description}}</p>
  </div>
  {{/each}}

  <h2 style="color: {{styles.header_color}};">Education</h2>
  {{#each education}}
  <div>
    <h3 style="color: {{../styles.accent_color}};">{{degree}}</h3>
    <p>{{institution}}, {{start_date}}{{#if end_date}} to {{end_date}}{{else}} (ongoing){{/if}}</p>
  </div>
  {{/each}}
</body>
</html>"##;

/// All courses batched into one section.
pub(crate) const COURSES: &str = r##"<html>
<body style="font-family: {{styles.font_family}};">
  <h2 style="color: {{styles.header_color}};">Courses and Training</h2>
  <hr style="border-color: {{styles.line_color}};"/>
  {{#each courses}}
  <div>
    <h3 style="color: {{../styles.accent_color}};">{{name}}</h3>
    <p>{{institution}} | {{hours}} academic hours | {{completed_on}}</p>
  </div>
  {{/each}}
</body>
</html>"##;

/// Recognitions, projects, sale items and academic products; each
/// sub-section appears only when its collection is non-empty.
pub(crate) const BOTTOM: &str = r##"<html>
<body style="font-family: {{styles.font_family}};">
  {{#if recognitions}}
  <h2 style="color: {{styles.header_color}};">Recognitions and Awards</h2>
  {{#each recognitions}}
  <div>
    <h3 style="color: {{../styles.accent_color}};">{{name}}</h3>
    <p>{{institution}} | {{awarded_on}}{{#if registry_code}} | Reg. {{registry_code}}{{/if}}</p>
  </div>
  {{/each}}
  {{/if}}

  {{#if projects}}
  <h2 style="color: {{styles.header_color}};">Projects</h2>
  {{#each projects}}
  <div>
    <h3 style="color: {{../styles.accent_color}};">{{name}}</h3>
    <p>{{date}}{{#if registry_id}} | {{registry_id}}{{/if}}</p>
    <p>{{description}}</p>
  </div>
  {{/each}}
  {{/if}}

  {{#if sale_items}}
  <h2 style="color: {{styles.header_color}};">Items for Sale</h2>
  {{#each sale_items}}
  <div>
    <h3 style="color: {{../styles.accent_color}};">{{name}}</h3>
    <p>${{price}} | condition: {{condition}} | stock: {{stock}}</p>
    <p>{{description}}</p>
  </div>
  {{/each}}
  {{/if}}

  {{#if academic_products}}
  <h2 style="color: {{styles.header_color}};">Academic Products</h2>
  {{#each academic_products}}
  <div>
    <h3 style="color: {{../styles.accent_color}};">{{title}}</h3>
    <p>{{publisher}} | {{published_on}}</p>
  </div>
  {{/each}}
  {{/if}}
</body>
</html>"##;

/// Table of contents for the attached certificates.
pub(crate) const CERTIFICATE_INDEX: &str = r##"<html>
<body style="font-family: {{styles.font_family}};">
  <h2 style="color: {{styles.header_color}};">Attached Certificates</h2>
  <hr style="border-color: {{styles.line_color}};"/>
  {{#each certificate_index}}
  <p>{{section}}: {{title}}</p>
  {{/each}}
</body>
</html>"##;
