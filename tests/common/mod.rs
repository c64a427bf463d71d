use std::sync::Arc;

use axum::Router;
use sqlx::SqlitePool;
use time::Date;
use weekmenu::{
    auth::JwtAuthProvider,
    config::JwtConfig,
    schedule::SqliteScheduleStore,
    server::{AppState, router},
};
use weekmenu_navigation::{NavigationContext, Navigator};
use weekmenu_week::FixedClock;

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_minimum_32_characters_long".to_string(),
        issuer: "weekmenu".to_string(),
        audience: "weekmenu".to_string(),
        expiration_days: 7,
    }
}

pub async fn setup_test_db() -> SqlitePool {
    let pool = weekmenu::create_pool(":memory:", 1).await.unwrap();
    weekmenu_db::migrate(&pool).await.unwrap();

    pool
}

pub struct TestApp {
    pub router: Router,
    pub store: SqliteScheduleStore,
    pub auth: Arc<JwtAuthProvider>,
}

pub async fn create_test_app(today: Date) -> TestApp {
    let pool = setup_test_db().await;
    let store = SqliteScheduleStore::new(pool);
    let auth = Arc::new(JwtAuthProvider::new(jwt_config()));

    let context = NavigationContext::new(auth.clone(), Arc::new(store.clone()))
        .with_clock(FixedClock(today));
    let router = router(AppState {
        navigator: Navigator::new(context),
    });

    TestApp {
        router,
        store,
        auth,
    }
}
