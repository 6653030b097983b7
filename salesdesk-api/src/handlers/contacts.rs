use actix_web::{web, HttpResponse, Result as ActixResult};
use lead_matching::MatchOptions;
use shared_types::{
    ContactsResponse, CreateContactRequest, EnrichContactRequest, UpdateContactRequest,
};
use std::sync::Arc;

use crate::database::contacts::{self as contacts_db, ContactPatch};
use crate::database::Database;
use crate::error::EngineError;
use crate::services::{enrichment, matcher};

pub async fn list_contacts(db: web::Data<Arc<Database>>) -> ActixResult<HttpResponse> {
    let conn = db.async_connection.lock().await?;
    let contacts = contacts_db::list_contacts(&conn, Some(100)).map_err(EngineError::from)?;

    Ok(HttpResponse::Ok().json(ContactsResponse { contacts }))
}

pub async fn create_contact(
    db: web::Data<Arc<Database>>,
    request: web::Json<CreateContactRequest>,
) -> ActixResult<HttpResponse> {
    if request.first_name.trim().is_empty() && request.last_name.trim().is_empty() {
        return Err(EngineError::InvalidInput("a contact needs a name".to_string()).into());
    }

    let conn = db.async_connection.lock().await?;
    let contact_id = contacts_db::insert_contact(&conn, &request).map_err(EngineError::from)?;
    let contact = contacts_db::get_contact(&conn, contact_id)
        .map_err(EngineError::from)?
        .ok_or_else(|| EngineError::not_found("contact", contact_id))?;

    Ok(HttpResponse::Created().json(contact))
}

pub async fn get_contact(
    db: web::Data<Arc<Database>>,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let contact_id = path.into_inner();

    let conn = db.async_connection.lock().await?;
    let contact = contacts_db::get_contact(&conn, contact_id)
        .map_err(EngineError::from)?
        .ok_or_else(|| EngineError::not_found("contact", contact_id))?;

    Ok(HttpResponse::Ok().json(contact))
}

pub async fn update_contact(
    db: web::Data<Arc<Database>>,
    path: web::Path<i64>,
    request: web::Json<UpdateContactRequest>,
) -> ActixResult<HttpResponse> {
    let contact_id = path.into_inner();
    let patch = ContactPatch::from(request.into_inner());

    let conn = db.async_connection.lock().await?;
    let contact = contacts_db::update_contact(&conn, contact_id, &patch)?;

    Ok(HttpResponse::Ok().json(contact))
}

pub async fn get_contact_matches(
    db: web::Data<Arc<Database>>,
    options: web::Data<MatchOptions>,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let contact_id = path.into_inner();

    let response =
        matcher::find_matches_for_contact_id(db.async_connection.clone(), contact_id, &options)
            .await?;

    Ok(HttpResponse::Ok().json(response))
}

pub async fn enrich_contact(
    db: web::Data<Arc<Database>>,
    path: web::Path<i64>,
    request: web::Json<EnrichContactRequest>,
) -> ActixResult<HttpResponse> {
    let contact_id = path.into_inner();
    let request = request.into_inner();

    let result = enrichment::enrich_contact(
        db.async_connection.clone(),
        contact_id,
        request.lead_id,
        &request.fields,
    )
    .await?;

    Ok(HttpResponse::Ok().json(result))
}
