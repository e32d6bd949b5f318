//! submission.rs
//!
//! Приём заявок с формы бронирования: серийный номер + одна строка в листе.
//!
//! Серийный номер - это количество уже заполненных ячеек в колонке A
//! (первая строка - заголовок, поэтому первая заявка получает 1). Счётчик не
//! атомарный: чтение и дописывание - два отдельных вызова без блокировки, и две
//! одновременные заявки могут получить одинаковый номер. Для сайта с редкими
//! заявками это допустимо; удалять строки из листа нельзя, иначе номера поедут.

use tracing::{info, warn};

use crate::{
    error::StoreError,
    models::{SubmissionRecord, SubmissionRequest},
    sheets::RowStore,
};

/// Колонка с серийными номерами.
pub const SERIAL_COLUMN: &str = "A:A";

/// Следующий серийный номер: `max(1, число непустых ячеек в колонке A)`.
/// Ошибка чтения не фатальна: пишем в лог и возвращаем 1.
pub async fn next_serial(store: &dyn RowStore, sheet: &str) -> u64 {
    match store.read_range(sheet, SERIAL_COLUMN).await {
        Ok(rows) => {
            let filled = rows
                .iter()
                .filter(|row| row.first().is_some_and(|cell| !cell.trim().is_empty()))
                .count() as u64;
            filled.max(1)
        }
        Err(e) => {
            warn!(error = %e, "Could not calculate serial number, defaulting to 1");
            1
        }
    }
}

/// Записывает заявку. Ровно один вызов append на заявку, без дедупликации.
pub async fn submit(
    store: &dyn RowStore,
    sheet: &str,
    request: SubmissionRequest,
) -> Result<SubmissionRecord, StoreError> {
    let serial_no = next_serial(store, sheet).await;
    let record = SubmissionRecord::new(serial_no, request);

    store.append_row(sheet, record.clone().into_row()).await?;
    info!(serial_no, kind = %record.request.kind, "Submission recorded in '{}'", sheet);

    Ok(record)
}
