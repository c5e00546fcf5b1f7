// src/readers/bitable.rs
//! Bitable apps: tables, their fields and records.

use crate::api::responses::{BitableTable, Passthrough};
use crate::api::types::PaginationRequest;
use crate::api::{drain_pages, FeishuRepository};
use crate::constants::{BITABLE_RECORDS_PAGE_SIZE, BITABLE_STRUCTURE_PAGE_SIZE};
use crate::error::AppError;
use crate::model::{BitableContent, TableContent, TableData};
use crate::types::Token;

/// Reads app info and every table. A table that fails keeps its entry with
/// an `error`; the app info and table list must succeed.
pub(super) async fn read_bitable(
    repo: &dyn FeishuRepository,
    app: &Token,
    record_cap: usize,
) -> Result<BitableContent, AppError> {
    let app_info = repo.bitable_app(app).await?;

    let table_list = drain_pages(
        move |page| async move { repo.bitable_tables(app, &page).await },
        PaginationRequest::complete(BITABLE_STRUCTURE_PAGE_SIZE),
    )
    .await?
    .items;

    let mut tables = Vec::with_capacity(table_list.len());
    for BitableTable { table_id, name } in table_list {
        let data = match read_table(repo, app, &table_id, record_cap).await {
            Ok(data) => data,
            Err(e) => {
                log::warn!("Reading table '{}' ({}) failed: {}", name, table_id, e);
                TableData::Failed {
                    error: e.to_string(),
                }
            }
        };
        tables.push(TableContent {
            table_id,
            name,
            data,
        });
    }

    Ok(BitableContent {
        app: app_info,
        table_count: tables.len(),
        tables,
    })
}

async fn read_table(
    repo: &dyn FeishuRepository,
    app: &Token,
    table_id: &str,
    record_cap: usize,
) -> Result<TableData, AppError> {
    let fields: Vec<Passthrough> = drain_pages(
        move |page| async move { repo.bitable_fields(app, table_id, &page).await },
        PaginationRequest::complete(BITABLE_STRUCTURE_PAGE_SIZE),
    )
    .await?
    .items;

    let records = drain_pages(
        move |page| async move { repo.bitable_records(app, table_id, &page).await },
        PaginationRequest::capped(BITABLE_RECORDS_PAGE_SIZE, record_cap),
    )
    .await?;
    log::debug!(
        "Table {}: {} fields, {} records{}",
        table_id,
        fields.len(),
        records.items.len(),
        if records.truncated { " (truncated)" } else { "" }
    );

    Ok(TableData::Loaded {
        fields,
        record_count: records.items.len(),
        truncated: records.truncated,
        records: records.items,
    })
}
