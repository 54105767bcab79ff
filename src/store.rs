use sea_orm::{
    ActiveValue::{NotSet, Set},
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
    sea_query::{Expr, OnConflict},
};
use tracing::debug;

use crate::{entities::movie, error::AppResult, models::MovieDetails};

/// Handle to the movie catalogue table. Cheap to clone; every method is a
/// single self-contained statement.
#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// All stored movies in insertion order.
    pub async fn get_all(&self) -> AppResult<Vec<movie::Model>> {
        let rows =
            movie::Entity::find().order_by_asc(movie::Column::Id).all(&self.db).await?;
        Ok(rows)
    }

    /// Appends a record and returns its freshly assigned identity.
    pub async fn insert_one(&self, details: MovieDetails) -> AppResult<i32> {
        let res = movie::Entity::insert(to_active(details.into_row())).exec(&self.db).await?;
        debug!(id = res.last_insert_id, "inserted movie");
        Ok(res.last_insert_id)
    }

    /// Bulk insert. Rows carrying an existing identity replace the stored
    /// row; rows with identity 0 get a fresh one. Inserted one statement per
    /// row so assigned and explicit identities can mix in a batch.
    pub async fn insert_many(&self, rows: Vec<movie::Model>) -> AppResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let count = rows.len();

        let txn = self.db.begin().await?;
        for row in rows {
            movie::Entity::insert(to_active(row))
                .on_conflict(
                    OnConflict::column(movie::Column::Id)
                        .update_columns([
                            movie::Column::Title,
                            movie::Column::Year,
                            movie::Column::Rated,
                            movie::Column::Released,
                            movie::Column::Runtime,
                            movie::Column::Genre,
                            movie::Column::Director,
                            movie::Column::Writer,
                            movie::Column::Actors,
                            movie::Column::Plot,
                        ])
                        .to_owned(),
                )
                .exec(&txn)
                .await?;
        }
        txn.commit().await?;

        debug!(count = count, "bulk inserted movies");
        Ok(())
    }

    /// Removes the row with the given identity; no-op if absent.
    pub async fn delete_one(&self, id: i32) -> AppResult<()> {
        let res = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        debug!(id = id, deleted = res.rows_affected, "deleted movie");
        Ok(())
    }

    /// Empties the table unconditionally.
    pub async fn delete_all(&self) -> AppResult<()> {
        let res = movie::Entity::delete_many().exec(&self.db).await?;
        debug!(deleted = res.rows_affected, "cleared catalogue");
        Ok(())
    }

    /// Movies whose title contains `text` as a case-sensitive substring.
    /// sqlite's LIKE folds ASCII case, so this goes through instr, which
    /// compares bytes and treats `%`/`_` in the input literally.
    pub async fn find_by_title(&self, text: &str) -> AppResult<Vec<movie::Model>> {
        let rows = movie::Entity::find()
            .filter(Expr::cust_with_values("instr(title, ?) > 0", [text.to_string()]))
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Movies whose actors field contains `text` as a case-insensitive
    /// substring (wrapped LIKE).
    pub async fn find_by_actor(&self, text: &str) -> AppResult<Vec<movie::Model>> {
        let rows = movie::Entity::find()
            .filter(movie::Column::Actors.contains(text))
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows)
    }
}

/// Identity 0 marks an unassigned row and becomes NotSet so sqlite picks the
/// next rowid.
fn to_active(row: movie::Model) -> movie::ActiveModel {
    movie::ActiveModel {
        id: if row.id == 0 { NotSet } else { Set(row.id) },
        title: Set(row.title),
        year: Set(row.year),
        rated: Set(row.rated),
        released: Set(row.released),
        runtime: Set(row.runtime),
        genre: Set(row.genre),
        director: Set(row.director),
        writer: Set(row.writer),
        actors: Set(row.actors),
        plot: Set(row.plot),
    }
}

#[cfg(test)]
mod tests {
    use migration::{Migrator, MigratorTrait};

    use super::*;

    async fn memory_store() -> MovieStore {
        // A pooled second connection to :memory: would see an empty database.
        let mut opts = sea_orm::ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1);
        let db = sea_orm::Database::connect(opts).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        MovieStore::new(db)
    }

    fn sample(title: &str, actors: &str) -> MovieDetails {
        MovieDetails {
            title: Some(title.to_string()),
            actors: Some(actors.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn insert_assigns_distinct_identities() {
        let store = memory_store().await;
        let first = store.insert_one(sample("The Matrix", "Keanu Reeves")).await.unwrap();
        let second = store.insert_one(sample("Inception", "Leonardo DiCaprio")).await.unwrap();
        assert_ne!(first, second);

        let all = store.get_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all.iter().filter(|m| m.id == first).count(), 1);
    }

    #[tokio::test]
    async fn get_all_preserves_insertion_order() {
        let store = memory_store().await;
        for title in ["A", "B", "C"] {
            store.insert_one(sample(title, "")).await.unwrap();
        }
        let titles: Vec<_> =
            store.get_all().await.unwrap().into_iter().filter_map(|m| m.title).collect();
        assert_eq!(titles, ["A", "B", "C"]);
    }

    #[tokio::test]
    async fn delete_all_empties_the_table() {
        let store = memory_store().await;
        store.insert_one(sample("The Matrix", "Keanu Reeves")).await.unwrap();
        store.delete_all().await.unwrap();
        assert!(store.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_one_removes_only_the_matching_row() {
        let store = memory_store().await;
        let keep = store.insert_one(sample("Inception", "")).await.unwrap();
        let drop = store.insert_one(sample("Tenet", "")).await.unwrap();
        store.delete_one(drop).await.unwrap();

        let all = store.get_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, keep);
    }

    #[tokio::test]
    async fn delete_one_is_a_noop_for_missing_identity() {
        let store = memory_store().await;
        store.insert_one(sample("Inception", "")).await.unwrap();
        store.delete_one(9999).await.unwrap();
        assert_eq!(store.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn title_search_is_case_sensitive() {
        let store = memory_store().await;
        store.insert_one(sample("The Matrix", "Keanu Reeves")).await.unwrap();
        store.insert_one(sample("Inception", "Leonardo DiCaprio")).await.unwrap();

        let hits = store.find_by_title("Matrix").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title.as_deref(), Some("The Matrix"));

        assert!(store.find_by_title("matrix").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn actor_search_ignores_case() {
        let store = memory_store().await;
        store
            .insert_one(sample("The Matrix", "Keanu Reeves, Carrie-Anne Moss"))
            .await
            .unwrap();

        let hits = store.find_by_actor("keanu").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert!(store.find_by_actor("Pacino").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn insert_many_replaces_on_identity_conflict() {
        let store = memory_store().await;
        let id = store.insert_one(sample("The Matrix", "Keanu Reeves")).await.unwrap();

        let mut replacement = sample("The Matrix Reloaded", "Keanu Reeves").into_row();
        replacement.id = id;
        store.insert_many(vec![replacement, sample("Inception", "").into_row()]).await.unwrap();

        let all = store.get_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, id);
        assert_eq!(all[0].title.as_deref(), Some("The Matrix Reloaded"));
    }

    #[tokio::test]
    async fn insert_many_accepts_an_empty_batch() {
        let store = memory_store().await;
        store.insert_many(Vec::new()).await.unwrap();
        assert!(store.get_all().await.unwrap().is_empty());
    }
}
