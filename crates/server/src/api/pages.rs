use crate::error::Result;
use crate::pages::PublicPage;
use crate::state::AppState;
use axum::{extract::State, response::Html};

async fn render(state: &AppState, page: PublicPage) -> Result<Html<String>> {
    let html = state.pages.render(page, state.repository.as_ref())?;
    Ok(Html(html))
}

pub async fn home_page(State(state): State<AppState>) -> Result<Html<String>> {
    render(&state, PublicPage::Home).await
}

pub async fn experience_page(State(state): State<AppState>) -> Result<Html<String>> {
    render(&state, PublicPage::Experience).await
}

pub async fn education_page(State(state): State<AppState>) -> Result<Html<String>> {
    render(&state, PublicPage::Education).await
}

pub async fn recognitions_page(State(state): State<AppState>) -> Result<Html<String>> {
    render(&state, PublicPage::Recognitions).await
}

pub async fn projects_page(State(state): State<AppState>) -> Result<Html<String>> {
    render(&state, PublicPage::Projects).await
}

pub async fn sale_page(State(state): State<AppState>) -> Result<Html<String>> {
    render(&state, PublicPage::Sale).await
}
