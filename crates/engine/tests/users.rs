use sea_orm::{ConnectionTrait, Database, DatabaseConnection, FromQueryResult, Statement};

use engine::{Engine, EngineError, ProfileUpdate, Signup};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

fn signup(name: &str, email: &str) -> Signup {
    Signup {
        name: name.to_string(),
        email: email.to_string(),
        password: "secret".to_string(),
        currency: None,
    }
}

async fn count_users(db: &DatabaseConnection) -> u64 {
    #[derive(FromQueryResult)]
    struct Count {
        n: i64,
    }

    let backend = db.get_database_backend();
    let row = Count::find_by_statement(Statement::from_string(
        backend,
        "SELECT COUNT(*) AS n FROM users",
    ))
    .one(db)
    .await
    .unwrap()
    .unwrap();
    row.n as u64
}

#[tokio::test]
async fn signup_trims_email_and_defaults_currency() {
    let (engine, _db) = engine_with_db().await;

    let user = engine.signup(signup("Alice", " alice@example.com ")).await.unwrap();

    assert_eq!(user.name, "Alice");
    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.currency.code(), "USD");
    assert!(user.id > 0);
}

#[tokio::test]
async fn signup_with_currency() {
    let (engine, _db) = engine_with_db().await;

    let user = engine
        .signup(Signup {
            currency: Some("inr".to_string()),
            ..signup("Bob", "bob@example.com")
        })
        .await
        .unwrap();

    assert_eq!(user.currency.code(), "INR");
}

#[tokio::test]
async fn signup_rejects_duplicate_email() {
    let (engine, db) = engine_with_db().await;
    engine.signup(signup("Alice", "alice@example.com")).await.unwrap();

    let err = engine
        .signup(signup("Other Alice", "alice@example.com"))
        .await
        .unwrap_err();

    assert_eq!(err, EngineError::ExistingKey("alice@example.com".to_string()));
    assert_eq!(count_users(&db).await, 1);
}

#[tokio::test]
async fn signup_requires_fields() {
    let (engine, _db) = engine_with_db().await;

    assert!(matches!(
        engine.signup(signup("", "a@example.com")).await,
        Err(EngineError::InvalidInput(_))
    ));
    assert!(matches!(
        engine.signup(signup("A", "  ")).await,
        Err(EngineError::InvalidInput(_))
    ));
    assert!(matches!(
        engine
            .signup(Signup {
                password: String::new(),
                ..signup("A", "a@example.com")
            })
            .await,
        Err(EngineError::InvalidInput(_))
    ));
    assert!(matches!(
        engine
            .signup(Signup {
                currency: Some("EURO".to_string()),
                ..signup("A", "a@example.com")
            })
            .await,
        Err(EngineError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn login_matches_email_and_password() {
    let (engine, _db) = engine_with_db().await;
    let alice = engine.signup(signup("Alice", "alice@example.com")).await.unwrap();

    let logged = engine.login("alice@example.com", "secret").await.unwrap();
    assert_eq!(logged.id, alice.id);

    assert_eq!(
        engine.login("alice@example.com", "wrong").await.unwrap_err(),
        EngineError::InvalidCredentials
    );
    assert_eq!(
        engine.login("nobody@example.com", "secret").await.unwrap_err(),
        EngineError::InvalidCredentials
    );
    assert!(matches!(
        engine.login("alice@example.com", "").await,
        Err(EngineError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn update_profile_applies_only_given_fields() {
    let (engine, _db) = engine_with_db().await;
    let alice = engine.signup(signup("Alice", "alice@example.com")).await.unwrap();

    let updated = engine
        .update_profile(
            alice.id,
            ProfileUpdate {
                currency: Some("eur".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.email, "alice@example.com");
    assert_eq!(updated.currency.code(), "EUR");

    let updated = engine
        .update_profile(
            alice.id,
            ProfileUpdate {
                email: Some("alice@new.example.com".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.email, "alice@new.example.com");
    assert_eq!(updated.currency.code(), "EUR");

    let profile = engine.profile(alice.id).await.unwrap();
    assert_eq!(profile.email, "alice@new.example.com");
    assert_eq!(profile.currency.code(), "EUR");
    assert_eq!(profile.name, "Alice");
}

#[tokio::test]
async fn update_profile_ignores_blank_fields() {
    let (engine, _db) = engine_with_db().await;
    let alice = engine.signup(signup("Alice", "alice@example.com")).await.unwrap();

    let updated = engine
        .update_profile(
            alice.id,
            ProfileUpdate {
                email: Some(String::new()),
                currency: Some("  ".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.email, "alice@example.com");
    assert_eq!(updated.currency, alice.currency);
}

#[tokio::test]
async fn update_profile_rejects_taken_email() {
    let (engine, _db) = engine_with_db().await;
    let alice = engine.signup(signup("Alice", "alice@example.com")).await.unwrap();
    engine.signup(signup("Bob", "bob@example.com")).await.unwrap();

    let err = engine
        .update_profile(
            alice.id,
            ProfileUpdate {
                email: Some("bob@example.com".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::ExistingKey("bob@example.com".to_string()));

    // Re-submitting one's own email is fine.
    engine
        .update_profile(
            alice.id,
            ProfileUpdate {
                email: Some("alice@example.com".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn profile_of_missing_user_is_not_found() {
    let (engine, _db) = engine_with_db().await;

    assert!(matches!(
        engine.profile(99).await,
        Err(EngineError::KeyNotFound(_))
    ));
    assert!(matches!(
        engine.update_profile(99, ProfileUpdate::default()).await,
        Err(EngineError::KeyNotFound(_))
    ));
    assert!(matches!(
        engine.delete_user(99).await,
        Err(EngineError::KeyNotFound(_))
    ));
}

#[tokio::test]
async fn delete_user_removes_account() {
    let (engine, db) = engine_with_db().await;
    let alice = engine.signup(signup("Alice", "alice@example.com")).await.unwrap();

    engine.delete_user(alice.id).await.unwrap();

    assert!(matches!(
        engine.profile(alice.id).await,
        Err(EngineError::KeyNotFound(_))
    ));
    assert_eq!(count_users(&db).await, 0);
}
