//! Invoices service

use crate::{
    error::AppResult,
    models::{invoice::Invoice, UserClaims},
    repository::Repository,
};

#[derive(Clone)]
pub struct InvoicesService {
    repository: Repository,
}

impl InvoicesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, claims: &UserClaims) -> AppResult<Vec<Invoice>> {
        self.repository.invoices_list(claims.scope()).await
    }

    pub async fn get_by_id(&self, claims: &UserClaims, id: i32) -> AppResult<Invoice> {
        let invoice = self.repository.invoices_get_by_id(id).await?;
        claims.require_self_or_admin(invoice.user_id)?;
        Ok(invoice)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.invoices_delete(id).await
    }
}
