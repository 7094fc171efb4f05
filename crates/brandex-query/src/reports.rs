//! User reports.

use brandex_core::{
  RecordStore,
  report::{Report, ReportInput},
  store::to_record,
};

use crate::{Result, records};

pub async fn post_report<S: RecordStore>(store: &S, input: &ReportInput) -> Result<Report> {
  records::create_one(store, to_record(input)?).await
}
