//! PostgreSQL backend tests. Require `DATABASE_URL`; run with
//! `cargo test -p solar-db -- --ignored`.

use assert_matches::assert_matches;
use solar_core::quote::CreateQuote;
use solar_core::status::{Milestone, PlantStatus};
use solar_db::{DocumentStore, PgStore};
use sqlx::PgPool;

fn joao() -> CreateQuote {
    CreateQuote {
        client_name: "João Silva".to_string(),
        kwh: Some(500.0),
        budget_value: Some(25_000.0),
        payment_term: Some("à vista".to_string()),
        ..Default::default()
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore]
async fn promote_moves_quote_into_plants(pool: PgPool) {
    let store = PgStore::new(pool);
    let quote = store.insert_quote(joao().validate().unwrap()).await.unwrap();

    let plant = store.promote_quote(&quote.id).await.unwrap().unwrap();
    assert_eq!(plant.client_name, "João Silva");
    assert_eq!(plant.created_at, quote.created_at);
    assert_eq!(plant.progress(), 0);

    assert!(store.find_quote(&quote.id).await.unwrap().is_none());
    assert_matches!(store.promote_quote(&quote.id).await, Ok(None));
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore]
async fn update_milestone_writes_single_column(pool: PgPool) {
    let store = PgStore::new(pool);
    let quote = store.insert_quote(joao().validate().unwrap()).await.unwrap();
    let plant = store.promote_quote(&quote.id).await.unwrap().unwrap();

    let updated = store
        .update_milestone(&plant.id, Milestone::ParecerAcesso, PlantStatus::Concluido)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.milestones.parecer_acesso, PlantStatus::Concluido);
    assert_eq!(updated.milestones.art, PlantStatus::Pendente);

    assert!(store
        .update_milestone("missing", Milestone::Art, PlantStatus::Concluido)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore]
async fn legacy_rows_default_missing_milestones(pool: PgPool) {
    sqlx::query(
        "INSERT INTO plants (id, client_name, kwh, budget_value, art)
         VALUES ('legacy', 'Antigo', 10, 20, 'concluido')",
    )
    .execute(&pool)
    .await
    .unwrap();

    let store = PgStore::new(pool);
    let plant = store.find_plant("legacy").await.unwrap().unwrap();
    assert_eq!(plant.milestones.art, PlantStatus::Concluido);
    assert_eq!(plant.milestones.instalado, PlantStatus::Pendente);
    assert_eq!(plant.payment_term, "à vista");
    assert_eq!(plant.progress(), 20);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore]
async fn deletes_report_whether_a_row_was_removed(pool: PgPool) {
    let store = PgStore::new(pool);
    let quote = store.insert_quote(joao().validate().unwrap()).await.unwrap();
    assert!(store.delete_quote(&quote.id).await.unwrap());
    assert!(!store.delete_quote(&quote.id).await.unwrap());
    assert!(!store.delete_plant("missing").await.unwrap());
}
