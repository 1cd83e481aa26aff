use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use tracing::{error, info};

use crate::config::{
    AdminUserConfig, AppConfig, JwtConfig, MongoConfig, WhatsappConfig,
};
use crate::handler::whatsapp_handler::WhatsappState;
use crate::middlewares::admin_middleware::AdminAuthState;
use crate::repository::admin_repo::MongoAdminRepository;
use crate::repository::content_repo::MongoContentRepository;
use crate::repository::quote_repo::MongoQuoteRepository;
use crate::router::admin_router::admin_router;
use crate::router::content_router::content_router;
use crate::router::quote_router::quote_router;
use crate::router::whatsapp_router::whatsapp_router;
use crate::service::admin_service::{AdminService, AdminServiceImpl};
use crate::service::content_service::ContentServiceImpl;
use crate::service::quote_service::QuoteServiceImpl;
use crate::util::jwt::JwtTokenUtilsImpl;

pub struct App {
    config: AppConfig,
    router: Router,
    pub quote_service: Arc<QuoteServiceImpl>,
    pub admin_service: Arc<AdminServiceImpl>,
    pub content_service: Arc<ContentServiceImpl>,
}

impl App {
    pub async fn new() -> Self {
        let config = AppConfig::from_env();
        let jwt_config = JwtConfig::from_env().expect("JWT config error");
        let mongo_config = MongoConfig::from_env().expect("Mongo config error");
        let whatsapp_config = WhatsappConfig::from_env();

        let db = crate::repository::connect(&mongo_config)
            .await
            .expect("MongoDB connection error");

        let quote_repo = Arc::new(MongoQuoteRepository::new(&db, &mongo_config.quote_collection));
        let admin_repo = Arc::new(MongoAdminRepository::new(&db, &mongo_config.admin_collection));
        let content_repo = Arc::new(MongoContentRepository::new(
            &db,
            &mongo_config.content_collection,
        ));

        let jwt_utils = JwtTokenUtilsImpl::new(jwt_config);

        let quote_service = Arc::new(QuoteServiceImpl::new(
            quote_repo.clone(),
            admin_repo.clone(),
            whatsapp_config.clone(),
        ));
        let admin_service = Arc::new(AdminServiceImpl::new(
            admin_repo.clone(),
            quote_repo.clone(),
            content_repo.clone(),
            jwt_utils.clone(),
        ));
        let content_service = Arc::new(ContentServiceImpl::new(
            content_repo,
            admin_repo.clone(),
        ));

        let admin_auth_state = Arc::new(AdminAuthState {
            jwt_utils: Arc::new(jwt_utils),
            admin_repo,
        });

        let router = Router::new()
            .merge(quote_router(quote_service.clone(), admin_auth_state.clone()))
            .merge(admin_router(admin_service.clone(), admin_auth_state.clone()))
            .merge(content_router(
                content_service.clone(),
                admin_auth_state,
            ))
            .merge(whatsapp_router(WhatsappState {
                config: Arc::new(whatsapp_config),
                quote_service: quote_service.clone(),
            }))
            .route("/health", get(|| async { "OK" }));

        let app = App {
            config,
            router,
            quote_service,
            admin_service,
            content_service,
        };
        app.create_default_admin().await;
        app
    }

    /// Seeds the bootstrap super admin on an empty database.
    async fn create_default_admin(&self) {
        let admin_conf = AdminUserConfig::from_env();
        match self.admin_service.seed_default_admin(&admin_conf).await {
            Ok(()) => {}
            Err(e) => error!("Failed to seed default admin account: {}", e),
        }
    }

    pub async fn start(self) {
        let addr = SocketAddr::new(
            self.config.host.parse().expect("Invalid host"),
            self.config.port,
        );
        info!("🚀 Server running at http://{}", addr);
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .expect("Failed to bind address");
        axum::serve(listener, self.router)
            .await
            .expect("Failed to start server");
    }
}
