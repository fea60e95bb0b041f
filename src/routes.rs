use crate::{
    api::{employee, import},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let upload_limiter = Arc::new(build_limiter(config.rate_upload_per_min));

    cfg.service(
        web::scope(&config.api_prefix)
            .service(
                web::scope("/import")
                    // /import
                    .service(
                        web::resource("")
                            .wrap(upload_limiter)
                            .route(web::post().to(import::import_csv)),
                    )
                    // /import/session/{session_id}
                    .service(
                        web::resource("/session/{session_id}")
                            .route(web::get().to(import::get_import_session)),
                    ),
            )
            .service(
                web::scope("/employee")
                    // /employee/{id}
                    .service(
                        web::resource("/{id}").route(web::get().to(employee::get_employee)),
                    )
                    // /employee/{id}/text
                    .service(
                        web::resource("/{id}/text")
                            .route(web::patch().to(employee::edit_text_field)),
                    )
                    // /employee/{id}/date
                    .service(
                        web::resource("/{id}/date")
                            .route(web::patch().to(employee::edit_date_field)),
                    ),
            ),
    );
}
