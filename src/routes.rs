use std::sync::Arc;

use axum::{
    extract::{Form, Query, State},
    response::{Html, Redirect},
};
use serde::Deserialize;

use crate::{
    AppState,
    error::AppResult,
    models::{MovieDetails, clean},
    templates,
};

pub async fn index() -> Html<String> {
    Html(templates::index_page())
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    query: Option<String>,
}

/// Absent or blank query means the form hasn't been submitted yet.
fn query_text(q: SearchQuery) -> Option<String> {
    let text = q.query?.trim().to_string();
    (!text.is_empty()).then_some(text)
}

pub async fn add_movie_form() -> Html<String> {
    Html(templates::add_movie_page(false))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddMovieForm {
    #[serde(default)]
    title: String,
    #[serde(default)]
    year: String,
    #[serde(default)]
    rated: String,
    #[serde(default)]
    released: String,
    #[serde(default)]
    runtime: String,
    #[serde(default)]
    genre: String,
    #[serde(default)]
    director: String,
    #[serde(default)]
    writer: String,
    #[serde(default)]
    actors: String,
    #[serde(default)]
    plot: String,
}

impl AddMovieForm {
    fn into_details(self) -> MovieDetails {
        MovieDetails {
            title: clean(&self.title),
            year: clean(&self.year),
            rated: clean(&self.rated),
            released: clean(&self.released),
            runtime: clean(&self.runtime),
            genre: clean(&self.genre),
            director: clean(&self.director),
            writer: clean(&self.writer),
            actors: clean(&self.actors),
            plot: clean(&self.plot),
        }
    }
}

pub async fn add_movie(
    State(state): State<Arc<AppState>>,
    Form(form): Form<AddMovieForm>,
) -> AppResult<Html<String>> {
    state.store.insert_one(form.into_details()).await?;
    Ok(Html(templates::add_movie_page(true)))
}

pub async fn search_title(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SearchQuery>,
) -> AppResult<Html<String>> {
    let query = query_text(q);
    let found = match &query {
        Some(text) => state.omdb.fetch_by_title(text).await?,
        None => None,
    };
    Ok(Html(templates::title_search_page(
        query.as_deref().unwrap_or(""),
        query.is_some(),
        found.as_ref(),
    )))
}

#[derive(Debug, Deserialize)]
pub struct SaveDetailsForm {
    details: String,
}

/// Accepts the rendered `Label: value` block from the lookup page and parses
/// it back into a record for insertion.
pub async fn save_title_result(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SaveDetailsForm>,
) -> AppResult<Redirect> {
    state.store.insert_one(MovieDetails::from_text(&form.details)).await?;
    Ok(Redirect::to("/movies"))
}

pub async fn search_local_title(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SearchQuery>,
) -> AppResult<Html<String>> {
    let query = query_text(q);
    let movies = match &query {
        Some(text) => state.store.find_by_title(text).await?,
        None => Vec::new(),
    };
    Ok(Html(templates::local_title_search_page(
        query.as_deref().unwrap_or(""),
        query.is_some(),
        &movies,
    )))
}

pub async fn search_local_actor(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SearchQuery>,
) -> AppResult<Html<String>> {
    let query = query_text(q);
    let movies = match &query {
        Some(text) => state.store.find_by_actor(text).await?,
        None => Vec::new(),
    };
    Ok(Html(templates::actor_search_page(
        query.as_deref().unwrap_or(""),
        query.is_some(),
        &movies,
    )))
}

pub async fn search_omdb(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SearchQuery>,
) -> AppResult<Html<String>> {
    let query = query_text(q);
    let movies = match &query {
        Some(text) => state.omdb.search_by_title(text).await?,
        None => Vec::new(),
    };
    Ok(Html(templates::omdb_search_page(
        query.as_deref().unwrap_or(""),
        query.is_some(),
        &movies,
    )))
}

#[derive(Debug, Deserialize)]
pub struct SaveSearchForm {
    query: String,
}

/// Re-runs the substring search and persists every detailed result.
pub async fn save_omdb_results(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SaveSearchForm>,
) -> AppResult<Redirect> {
    let query = form.query.trim();
    if query.is_empty() {
        return Ok(Redirect::to("/search/omdb"));
    }
    let found = state.omdb.search_by_title(query).await?;
    let rows = found.into_iter().map(MovieDetails::into_row).collect();
    state.store.insert_many(rows).await?;
    Ok(Redirect::to("/movies"))
}

pub async fn all_movies(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let movies = state.store.get_all().await?;
    Ok(Html(templates::all_movies_page(&movies)))
}

#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    id: i32,
}

pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    Form(form): Form<DeleteForm>,
) -> AppResult<Redirect> {
    state.store.delete_one(form.id).await?;
    Ok(Redirect::to("/movies"))
}

pub async fn clear_movies(State(state): State<Arc<AppState>>) -> AppResult<Redirect> {
    state.store.delete_all().await?;
    Ok(Redirect::to("/movies"))
}
