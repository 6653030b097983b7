pub mod companies;
pub mod contacts;
pub mod leads;

use actix_web::web;

/// Register every `/api` route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/leads", web::get().to(leads::list_leads))
        .route("/api/leads", web::post().to(leads::create_lead))
        .route("/api/leads/{id}", web::get().to(leads::get_lead))
        .route("/api/leads/{id}/matches", web::get().to(leads::get_lead_matches))
        .route("/api/contacts", web::get().to(contacts::list_contacts))
        .route("/api/contacts", web::post().to(contacts::create_contact))
        .route("/api/contacts/{id}", web::get().to(contacts::get_contact))
        .route("/api/contacts/{id}", web::put().to(contacts::update_contact))
        .route("/api/contacts/{id}/matches", web::get().to(contacts::get_contact_matches))
        .route("/api/contacts/{id}/enrich", web::post().to(contacts::enrich_contact))
        .route("/api/companies", web::get().to(companies::list_companies))
        .route("/api/companies/{id}", web::get().to(companies::get_company));
}
