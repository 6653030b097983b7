use actix_web::{web, HttpResponse, Result as ActixResult};
use lead_matching::MatchOptions;
use shared_types::{CreateLeadRequest, LeadsResponse};
use std::sync::Arc;

use crate::database::leads as leads_db;
use crate::database::Database;
use crate::error::EngineError;
use crate::services::matcher;

pub async fn list_leads(db: web::Data<Arc<Database>>) -> ActixResult<HttpResponse> {
    let conn = db.async_connection.lock().await?;
    let leads = leads_db::list_leads(&conn, 100).map_err(EngineError::from)?;

    Ok(HttpResponse::Ok().json(LeadsResponse { leads }))
}

pub async fn create_lead(
    db: web::Data<Arc<Database>>,
    request: web::Json<CreateLeadRequest>,
) -> ActixResult<HttpResponse> {
    if request.full_name.trim().is_empty() {
        return Err(EngineError::InvalidInput("full_name is required".to_string()).into());
    }

    let conn = db.async_connection.lock().await?;
    let lead_id = leads_db::insert_lead(&conn, &request)?;
    let lead = leads_db::get_lead(&conn, lead_id)
        .map_err(EngineError::from)?
        .ok_or_else(|| EngineError::not_found("lead", lead_id))?;

    tracing::info!("Imported lead {} ({})", lead.id, lead.full_name);
    Ok(HttpResponse::Created().json(lead))
}

pub async fn get_lead(
    db: web::Data<Arc<Database>>,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let lead_id = path.into_inner();

    let conn = db.async_connection.lock().await?;
    let lead = leads_db::get_lead(&conn, lead_id)
        .map_err(EngineError::from)?
        .ok_or_else(|| EngineError::not_found("lead", lead_id))?;

    Ok(HttpResponse::Ok().json(lead))
}

pub async fn get_lead_matches(
    db: web::Data<Arc<Database>>,
    options: web::Data<MatchOptions>,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let lead_id = path.into_inner();

    let response =
        matcher::find_matches_for_lead(db.async_connection.clone(), lead_id, &options).await?;

    Ok(HttpResponse::Ok().json(response))
}
