// Query stage: discover the user's jobs, then fetch each field of each job
//
// squeue is asked for one field of one job at a time. Job names, reasons and
// comments can contain any separator, so a combined multi-column line cannot
// be split reliably; single-value responses need no parsing at all.

use std::collections::BTreeSet;

use crate::config::QueueConfig;
use crate::error::QueryError;
use crate::models::{Field, FieldTable, JobId};
use crate::query::runner::{QueryRunner, SqueueRequest};

/// Everything the render stage needs: jobs in discovery order plus their values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueSnapshot {
    pub jobs: Vec<JobId>,
    pub table: FieldTable,
}

/// Name of the user whose queue is shown, from `USER`
pub fn current_user() -> Result<String, QueryError> {
    std::env::var("USER").map_err(|_| QueryError::MissingUser)
}

/// List the user's queued job ids. Blank lines are skipped.
pub fn list_jobs<R: QueryRunner>(runner: &mut R, user: &str) -> Result<Vec<JobId>, QueryError> {
    let lines = runner.run(&SqueueRequest::ListJobs { user: user.to_string() })?;
    Ok(lines.into_iter().filter(|line| !line.trim().is_empty()).collect())
}

/// Fetch one field of one job.
///
/// Returns `Ok(None)` when squeue no longer knows the job (fewer than two
/// lines). A header that differs from the field name is protocol drift.
pub fn query_field<R: QueryRunner>(
    runner: &mut R,
    user: &str,
    field: &Field,
    job: &str,
) -> Result<Option<String>, QueryError> {
    let lines = runner.run(&SqueueRequest::FieldForJob {
        user: user.to_string(),
        code: field.code.clone(),
        job: job.to_string(),
    })?;

    if lines.len() < 2 {
        log::debug!("job {} vanished before {} could be read", job, field.name);
        return Ok(None);
    }

    validate_header(field, job, &lines[0])?;
    Ok(Some(lines[1].clone()))
}

/// squeue must echo the field name as the header of its single column
pub fn validate_header(field: &Field, job: &str, header: &str) -> Result<(), QueryError> {
    if header == field.name {
        Ok(())
    } else {
        Err(QueryError::HeaderMismatch {
            field: field.name.clone(),
            job: job.to_string(),
            found: header.to_string(),
        })
    }
}

/// If anything was gathered, it must cover exactly the configured fields
pub fn validate_field_set(table: &FieldTable, config: &QueueConfig) -> Result<(), QueryError> {
    if table.is_empty() {
        return Ok(());
    }

    let expected: BTreeSet<&str> = config.fields().iter().map(|f| f.name.as_str()).collect();
    let found = table.field_names();
    if expected == found {
        return Ok(());
    }

    // Report missing fields in column order
    let missing = config
        .fields()
        .iter()
        .filter(|f| !found.contains(f.name.as_str()))
        .map(|f| f.name.clone())
        .collect();
    let unexpected = found
        .difference(&expected)
        .map(|name| name.to_string())
        .collect();
    Err(QueryError::FieldSetMismatch { missing, unexpected })
}

/// Run the whole query stage for `user`
pub fn collect_queue<R: QueryRunner>(
    runner: &mut R,
    user: &str,
    config: &QueueConfig,
) -> Result<QueueSnapshot, QueryError> {
    let jobs = list_jobs(runner, user)?;
    log::info!(
        "{} job(s) queued for {}, {} field queries to run",
        jobs.len(),
        user,
        jobs.len() * config.fields().len()
    );

    let mut table = FieldTable::new();
    for field in config.fields() {
        for job in &jobs {
            if let Some(value) = query_field(runner, user, field, job)? {
                table.insert(&field.name, job, value);
            }
        }
    }

    validate_field_set(&table, config)?;
    Ok(QueueSnapshot { jobs, table })
}
