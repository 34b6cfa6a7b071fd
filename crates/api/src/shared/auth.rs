use crate::error::ElnError;
use actix_web::HttpRequest;
use eln_reminders_infra::ElnContext;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Only callers presenting the configured trigger secret are allowed to
/// start a reminders run
pub fn protect_trigger_route(http_req: &HttpRequest, ctx: &ElnContext) -> Result<(), ElnError> {
    let api_key = match http_req.headers().get(API_KEY_HEADER) {
        Some(api_key) => match api_key.to_str() {
            Ok(api_key) => api_key,
            Err(_) => {
                return Err(ElnError::Unauthorized(format!(
                    "Malformed `{}` header",
                    API_KEY_HEADER
                )))
            }
        },
        None => {
            return Err(ElnError::Unauthorized(format!(
                "Unable to find api-key in `{}` header",
                API_KEY_HEADER
            )))
        }
    };

    if api_key != ctx.config.reminders_trigger_secret {
        return Err(ElnError::Unauthorized(format!(
            "Invalid api-key provided in `{}` header",
            API_KEY_HEADER
        )));
    }
    Ok(())
}
