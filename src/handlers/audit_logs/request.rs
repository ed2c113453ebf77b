//! Audit log request DTOs

use serde::Deserialize;
use uuid::Uuid;

use crate::{
    constants::{admin_actions, target_types},
    db::repositories::AdminLogFilter,
    error::{AppError, AppResult},
    models::Pagination,
    utils::{non_empty, parse_datetime_param, validate_date_range},
};

/// Query parameters for listing audit entries
#[derive(Debug, Default, Deserialize)]
pub struct ListAdminLogsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub admin_id: Option<Uuid>,
    pub action: Option<String>,
    pub target_type: Option<String>,
    pub target_id: Option<Uuid>,
    pub created_from: Option<String>,
    pub created_to: Option<String>,
}

impl ListAdminLogsQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.per_page)
    }

    pub fn to_filter(&self) -> AppResult<AdminLogFilter> {
        let action = non_empty(self.action.as_deref());
        if let Some(action) = &action {
            if !admin_actions::ALL.contains(&action.as_str()) {
                return Err(AppError::Validation(format!(
                    "Invalid action: {}. Valid actions: {:?}",
                    action,
                    admin_actions::ALL
                )));
            }
        }

        let target_type = non_empty(self.target_type.as_deref());
        if let Some(target_type) = &target_type {
            if !target_types::ALL.contains(&target_type.as_str()) {
                return Err(AppError::Validation(format!(
                    "Invalid target type: {}. Valid types: {:?}",
                    target_type,
                    target_types::ALL
                )));
            }
        }

        let created_from = parse_datetime_param("created_from", self.created_from.as_deref())?;
        let created_to = parse_datetime_param("created_to", self.created_to.as_deref())?;
        validate_date_range(created_from, created_to)?;

        Ok(AdminLogFilter {
            admin_id: self.admin_id,
            action,
            target_type,
            target_id: self.target_id,
            created_from,
            created_to,
        })
    }
}
