// src/readers/sheet.rs
//! Spreadsheets, one worksheet at a time.

use crate::api::FeishuRepository;
use crate::error::AppError;
use crate::model::{SheetContent, SheetData, SpreadsheetContent, SpreadsheetSummary};
use crate::types::Token;

/// Reads spreadsheet metadata, then each worksheet's values in order.
///
/// A worksheet whose values cannot be read keeps its entry with an `error`
/// in place of `values`. A failed worksheet listing yields no worksheets;
/// only a metadata failure fails the whole read.
pub(super) async fn read_spreadsheet(
    repo: &dyn FeishuRepository,
    token: &Token,
) -> Result<SpreadsheetContent, AppError> {
    let meta = repo.spreadsheet_meta(token).await?;

    // The v3 metadata endpoint can omit worksheets; the query endpoint lists them
    let sheet_list = if meta.sheets.is_empty() {
        match repo.list_sheets(token).await {
            Ok(listed) => listed,
            Err(e) => {
                log::warn!("Listing worksheets of {} failed: {}", token, e);
                Vec::new()
            }
        }
    } else {
        meta.sheets
    };

    let mut sheets = Vec::with_capacity(sheet_list.len());
    for properties in sheet_list {
        let data = match repo.sheet_values(token, &properties.sheet_id).await {
            Ok(range) => SheetData::Values {
                values: range.values,
            },
            Err(e) => {
                log::warn!(
                    "Reading sheet '{}' ({}) failed: {}",
                    properties.title,
                    properties.sheet_id,
                    e
                );
                SheetData::Failed {
                    error: e.to_string(),
                }
            }
        };
        sheets.push(SheetContent {
            sheet_id: properties.sheet_id.clone(),
            title: properties.title.clone(),
            properties,
            data,
        });
    }

    Ok(SpreadsheetContent {
        spreadsheet: SpreadsheetSummary {
            title: meta.title,
            owner_id: meta.owner_id,
            sheet_count: sheets.len(),
        },
        sheets,
    })
}
