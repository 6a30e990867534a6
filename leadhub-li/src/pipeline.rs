//! Batch chunker and import orchestrator
//!
//! Executes one import run: snapshot the counselor context, split the input
//! into chunks, normalize + derive + persist each row, classify outcomes,
//! and aggregate the batch summary with both report artifacts.
//!
//! Failure isolation is layered. A failing row is marked Failed and the
//! chunk continues; a panic escaping the row path is confined to its chunk
//! task and fails that chunk's rows; nothing short of an invalid chunk size
//! ever surfaces as a hard error to the caller.

use crate::config::{AssignmentRules, DEFAULT_CHUNK_SIZE};
use crate::error::ImportError;
use crate::models::{
    merge_field_issues, FieldIssueMap, ImportOutcome, NormalizedRow, RawLeadRecord, RowAuditLog,
    RowStatus,
};
use crate::normalize::{normalize_record, RowLog};
use crate::report;
use crate::rules::{derive_assignment, CounselorContext};
use crate::store::LeadStore;
use leadhub_common::db::models::{NewLead, NewRemark, NewStageHistory};
use leadhub_common::PipelineStage;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Caller-supplied knobs for one import run
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Validate and classify without persisting
    pub dry_run: bool,
    /// Rows per chunk; must be greater than zero
    pub chunk_size: usize,
    pub assignment: AssignmentRules,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            chunk_size: DEFAULT_CHUNK_SIZE,
            assignment: AssignmentRules::default(),
        }
    }
}

struct ChunkOutput {
    entries: Vec<RowAuditLog>,
    field_issues: FieldIssueMap,
}

/// Run one import batch end to end.
///
/// Returns Err only for a zero chunk size. Every data-level failure is
/// represented inside the returned outcome; `success` is unconditionally
/// true once processing starts.
pub async fn run_import(
    store: Arc<dyn LeadStore>,
    raw_leads: Vec<RawLeadRecord>,
    options: ImportOptions,
) -> Result<ImportOutcome, ImportError> {
    if options.chunk_size == 0 {
        return Err(ImportError::InvalidChunkSize);
    }

    let batch_id = Uuid::new_v4();
    let started = Instant::now();
    let total_rows = raw_leads.len();

    info!(
        batch_id = %batch_id,
        total_rows,
        chunk_size = options.chunk_size,
        dry_run = options.dry_run,
        "Starting lead import batch"
    );

    // Setup: one roster snapshot for the whole run. A lookup failure is
    // non-fatal; assignment degrades to unassigned.
    let context = match CounselorContext::load(store.as_ref(), &options.assignment).await {
        Ok(context) => {
            info!(
                batch_id = %batch_id,
                counselors = context.counselors.len(),
                manager_found = context.manager_id.is_some(),
                "Counselor context snapshot loaded"
            );
            context
        }
        Err(e) => {
            warn!(
                batch_id = %batch_id,
                error = %e,
                "Failed to load counselor roster, proceeding unassigned (non-fatal, continuing)"
            );
            CounselorContext::empty()
        }
    };

    let chunks = split_into_chunks(raw_leads, options.chunk_size);
    let total_chunks = chunks.len();

    let mut validation_log: Vec<RowAuditLog> = Vec::with_capacity(total_rows);
    let mut field_issues = FieldIssueMap::new();
    let mut successful_chunks = 0usize;
    let mut failed_chunks = 0usize;
    let mut next_row_number = 1usize;

    for (chunk_index, chunk) in chunks.into_iter().enumerate() {
        let start_row = next_row_number;
        next_row_number += chunk.len();

        // The chunk runs in its own task so a panic escaping the row path
        // is confined to the chunk. Tasks are awaited one at a time; row
        // order in the log is the input order.
        let rows = Arc::new(chunk);
        let task = tokio::spawn(process_chunk(
            Arc::clone(&store),
            context.clone(),
            options.clone(),
            Arc::clone(&rows),
            start_row,
        ));

        match task.await {
            Ok(output) => {
                successful_chunks += 1;
                debug!(
                    batch_id = %batch_id,
                    chunk = chunk_index + 1,
                    rows = output.entries.len(),
                    "Chunk complete"
                );
                validation_log.extend(output.entries);
                merge_field_issues(&mut field_issues, output.field_issues);
            }
            Err(e) => {
                failed_chunks += 1;
                warn!(
                    batch_id = %batch_id,
                    chunk = chunk_index + 1,
                    error = %e,
                    "Chunk aborted, failing its rows (non-fatal, continuing)"
                );
                for (offset, row) in rows.iter().enumerate() {
                    validation_log.push(RowAuditLog {
                        row_number: start_row + offset,
                        status: RowStatus::Failed,
                        fixes_applied: Vec::new(),
                        warnings: Vec::new(),
                        errors: vec![format!("Chunk {} aborted: {}", chunk_index + 1, e)],
                        original_data: row.clone(),
                        normalized_data: None,
                    });
                }
            }
        }
    }

    let imported = count_status(&validation_log, RowStatus::Imported);
    let imported_with_issues = count_status(&validation_log, RowStatus::ImportedWithIssues);
    let failed = count_status(&validation_log, RowStatus::Failed);
    let processing_time_ms = started.elapsed().as_millis() as u64;

    info!(
        batch_id = %batch_id,
        imported,
        imported_with_issues,
        failed,
        failed_chunks,
        processing_time_ms,
        "Lead import batch complete"
    );

    let batch_summary = crate::models::BatchSummary {
        total_rows,
        imported,
        imported_with_issues,
        failed,
        processing_time_ms,
        total_chunks,
        successful_chunks,
        failed_chunks,
        field_issues,
    };

    let downloadable_reports = report::build_reports(&validation_log);

    Ok(ImportOutcome {
        success: true,
        batch_summary,
        validation_log,
        downloadable_reports,
    })
}

/// Split the batch into contiguous chunks of at most `chunk_size` rows
fn split_into_chunks(rows: Vec<RawLeadRecord>, chunk_size: usize) -> Vec<Vec<RawLeadRecord>> {
    let mut chunks = Vec::new();
    let mut current = Vec::new();
    for row in rows {
        current.push(row);
        if current.len() == chunk_size {
            chunks.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

fn count_status(entries: &[RowAuditLog], status: RowStatus) -> usize {
    entries.iter().filter(|e| e.status == status).count()
}

/// Process one chunk's rows in order, isolating failures per row
async fn process_chunk(
    store: Arc<dyn LeadStore>,
    context: CounselorContext,
    options: ImportOptions,
    rows: Arc<Vec<RawLeadRecord>>,
    start_row: usize,
) -> ChunkOutput {
    let mut entries = Vec::with_capacity(rows.len());
    let mut field_issues = FieldIssueMap::new();

    for (offset, row) in rows.iter().enumerate() {
        let entry = process_row(
            store.as_ref(),
            &context,
            &options,
            row,
            start_row + offset,
            &mut field_issues,
        )
        .await;
        entries.push(entry);
    }

    ChunkOutput {
        entries,
        field_issues,
    }
}

/// Process a single row: normalize, derive, persist, classify.
///
/// Never fails; a persistence error marks the row Failed and the batch
/// moves on.
async fn process_row(
    store: &dyn LeadStore,
    context: &CounselorContext,
    options: &ImportOptions,
    row: &RawLeadRecord,
    row_number: usize,
    field_issues: &mut FieldIssueMap,
) -> RowAuditLog {
    let mut log = RowLog::default();
    let lead = normalize_record(row, &mut log, field_issues);
    let assignment = derive_assignment(&lead, context);

    let normalized = NormalizedRow {
        lead,
        counselor_id: assignment.counselor_id,
        current_stage: assignment.current_stage,
    };

    let mut processing_error = None;
    if !options.dry_run {
        if let Err(e) = persist_row(store, context, &normalized).await {
            warn!(
                row_number,
                uid = %normalized.lead.uid,
                error = %e,
                "Failed to persist lead (non-fatal, continuing)"
            );
            processing_error = Some(format!("Row processing failed: {}", e));
        }
    }

    let status = if let Some(message) = processing_error {
        log.errors.push(message);
        RowStatus::Failed
    } else if !log.warnings.is_empty() || !log.fixes_applied.is_empty() {
        RowStatus::ImportedWithIssues
    } else {
        RowStatus::Imported
    };

    RowAuditLog {
        row_number,
        status,
        fixes_applied: log.fixes_applied,
        warnings: log.warnings,
        errors: log.errors,
        original_data: row.clone(),
        normalized_data: Some(normalized),
    }
}

/// Persist one row's entities: the lead, its bulk-import remark when
/// remarks are present, and the initial stage transition unless the lead
/// stays at the unassigned sentinel
async fn persist_row(
    store: &dyn LeadStore,
    context: &CounselorContext,
    normalized: &NormalizedRow,
) -> leadhub_common::Result<i64> {
    let lead = &normalized.lead;
    let lead_id = store
        .create_lead(&NewLead {
            uid: lead.uid.clone(),
            name: lead.name.clone(),
            email: lead.email.clone(),
            phone: lead.phone.clone(),
            country: lead.country.clone(),
            intake: lead.intake.clone(),
            source: lead.source.clone(),
            passport_status: lead.passport_status.clone(),
            counselor_id: normalized.counselor_id,
            current_stage: normalized.current_stage.clone(),
            lead_created_date: lead.lead_created_date,
        })
        .await?;

    if let Some(body) = &lead.remarks_text {
        store
            .create_remark(&NewRemark {
                lead_id,
                author_id: context.manager_id,
                body: body.clone(),
                origin: "bulk-import".to_string(),
            })
            .await?;
    }

    if normalized.current_stage != PipelineStage::YetToAssign.as_str() {
        store
            .create_stage_history(&NewStageHistory {
                lead_id,
                from_stage: None,
                to_stage: normalized.current_stage.clone(),
                changed_by: context.manager_id,
                changed_at: lead.lead_created_date,
            })
            .await?;
    }

    Ok(lead_id)
}
