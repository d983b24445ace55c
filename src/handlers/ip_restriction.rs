//! # IP 접근 목록 핸들러
//!
//! 블랙리스트가 화이트리스트보다 우선하며, 화이트리스트가 비어 있으면
//! 블랙리스트에 없는 모든 IP를 허용합니다.

use actix_web::{delete, get, post, web, HttpResponse};

use crate::core::ServiceContainer;
use crate::domain::dto::{AccessCheckResponse, AccessListChangeResponse, AccessListResponse, ApiResponse};
use crate::domain::models::AccessList;
use crate::errors::AppResult;
use crate::utils::string_utils::validate_required_string;

#[get("/check/{ip}")]
pub async fn check_access(
    container: web::Data<ServiceContainer>,
    ip: web::Path<String>,
) -> AppResult<HttpResponse> {
    let ip = ip.into_inner();
    let decision = container.ip_restriction.decide(&ip).await?;

    let body = AccessCheckResponse {
        is_allowed: decision.is_allowed(),
        ip,
        decision,
    };
    let response = if body.is_allowed {
        ApiResponse::with_message(body, "접근 허용")
    } else {
        ApiResponse::denied(body, "접근 차단")
    };
    Ok(HttpResponse::Ok().json(response))
}

fn change_response(ip: String, list: AccessList, changed: bool, action: &str) -> HttpResponse {
    let message = if changed {
        format!("{} {}", list.label(), action)
    } else {
        format!("{} 변경 없음", list.label())
    };
    HttpResponse::Ok().json(ApiResponse::with_message(
        AccessListChangeResponse { ip, list, changed },
        message,
    ))
}

#[post("/whitelist/{ip}")]
pub async fn add_to_whitelist(
    container: web::Data<ServiceContainer>,
    ip: web::Path<String>,
) -> AppResult<HttpResponse> {
    let ip = validate_required_string(&ip, "ip")?;
    let changed = container.ip_restriction.add_to_whitelist(&ip).await?;
    Ok(change_response(ip, AccessList::Whitelist, changed, "추가됨"))
}

#[post("/blacklist/{ip}")]
pub async fn add_to_blacklist(
    container: web::Data<ServiceContainer>,
    ip: web::Path<String>,
) -> AppResult<HttpResponse> {
    let ip = validate_required_string(&ip, "ip")?;
    let changed = container.ip_restriction.add_to_blacklist(&ip).await?;
    Ok(change_response(ip, AccessList::Blacklist, changed, "추가됨"))
}

#[delete("/whitelist/{ip}")]
pub async fn remove_from_whitelist(
    container: web::Data<ServiceContainer>,
    ip: web::Path<String>,
) -> AppResult<HttpResponse> {
    let ip = ip.into_inner();
    let changed = container.ip_restriction.remove_from_whitelist(&ip).await?;
    Ok(change_response(ip, AccessList::Whitelist, changed, "제거됨"))
}

#[delete("/blacklist/{ip}")]
pub async fn remove_from_blacklist(
    container: web::Data<ServiceContainer>,
    ip: web::Path<String>,
) -> AppResult<HttpResponse> {
    let ip = ip.into_inner();
    let changed = container.ip_restriction.remove_from_blacklist(&ip).await?;
    Ok(change_response(ip, AccessList::Blacklist, changed, "제거됨"))
}

#[get("/whitelist")]
pub async fn get_whitelist(container: web::Data<ServiceContainer>) -> AppResult<HttpResponse> {
    let ips = container.ip_restriction.whitelist().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(AccessListResponse {
        list: AccessList::Whitelist,
        size: ips.len(),
        ips,
    })))
}

#[get("/blacklist")]
pub async fn get_blacklist(container: web::Data<ServiceContainer>) -> AppResult<HttpResponse> {
    let ips = container.ip_restriction.blacklist().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(AccessListResponse {
        list: AccessList::Blacklist,
        size: ips.len(),
        ips,
    })))
}
