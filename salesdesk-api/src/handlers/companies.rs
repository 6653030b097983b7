use actix_web::{web, HttpResponse, Result as ActixResult};
use shared_types::CompaniesResponse;
use std::sync::Arc;

use crate::database::companies as db;
use crate::database::Database;
use crate::error::EngineError;

pub async fn list_companies(database: web::Data<Arc<Database>>) -> ActixResult<HttpResponse> {
    let conn = database.async_connection.lock().await?;
    let companies = db::list_companies(&conn, 100).map_err(EngineError::from)?;

    Ok(HttpResponse::Ok().json(CompaniesResponse { companies }))
}

pub async fn get_company(
    database: web::Data<Arc<Database>>,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    let company_id = path.into_inner();

    let conn = database.async_connection.lock().await?;
    let company = db::get_company(&conn, company_id)
        .map_err(EngineError::from)?
        .ok_or_else(|| EngineError::not_found("company", company_id))?;

    Ok(HttpResponse::Ok().json(company))
}
