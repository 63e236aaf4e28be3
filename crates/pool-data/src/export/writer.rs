//! CSV writers for the account and visit tables.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use tracing::info;

use crate::config::OutputConfig;
use crate::generators::{AccountType, GeneratedAccount, GeneratedVisit, MemberType, VisitKind};

const CHECKIN_TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Account table columns, in output order.
pub const ACCOUNT_HEADERS: [&str; 27] = [
    "Acct #",
    "Acct Type",
    "Tags",
    "Date Registered",
    "Legacy Acct #",
    "User Name",
    "First Name",
    "Last Name",
    "Email",
    "Site Access",
    "Directory",
    "Guest Credits",
    "Billing Member Email",
    "Street Address",
    "Street Address 2",
    "City",
    "State",
    "Zip",
    "Cell Phone",
    "Work Phone",
    "Home Phone",
    "Payment Status",
    "Checkin Note",
    "# Members",
    "Authnet",
    "Account",
    "Member Names",
];

/// Visit table columns, in output order.
pub const VISIT_HEADERS: [&str; 7] = [
    "checkin_time",
    "acct_id",
    "account_type",
    "name",
    "member_type",
    "type",
    "num_credits",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Output directory does not exist: {0}")]
    MissingDirectory(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Timestamp formatting error: {0}")]
    Format(#[from] time::error::Format),
}

/// One account row; field order matches [`ACCOUNT_HEADERS`].
#[derive(Serialize)]
struct AccountRecord<'a> {
    id: u32,
    account_type: &'static str,
    tags: String,
    registered_on: String,
    legacy_id: Option<u32>,
    username: &'a str,
    first_name: &'a str,
    last_name: &'a str,
    email: &'a str,
    site_access: &'a str,
    directory: &'static str,
    guest_credits: u32,
    billing_email: &'a str,
    street_address: &'a str,
    street_address_2: &'a str,
    city: &'a str,
    state: &'a str,
    zip: &'a str,
    cell_phone: &'a str,
    work_phone: &'a str,
    home_phone: &'a str,
    payment_status: &'static str,
    checkin_note: Option<&'a str>,
    member_count: usize,
    authnet: Option<u32>,
    account: String,
    member_names: String,
}

impl<'a> From<&'a GeneratedAccount> for AccountRecord<'a> {
    fn from(account: &'a GeneratedAccount) -> Self {
        Self {
            id: account.id,
            account_type: account.account_type.as_str(),
            tags: account
                .tags
                .iter()
                .map(|t| t.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            registered_on: account.registered_on.to_string(),
            legacy_id: account.legacy_id,
            username: &account.username,
            first_name: &account.first_name,
            last_name: &account.last_name,
            email: &account.email,
            site_access: &account.site_access,
            directory: if account.listed_in_directory { "Yes" } else { "No" },
            guest_credits: account.guest_credits,
            billing_email: &account.billing_email,
            street_address: &account.street_address,
            street_address_2: &account.street_address_2,
            city: &account.city,
            state: &account.state,
            zip: &account.zip,
            cell_phone: &account.cell_phone,
            work_phone: &account.work_phone,
            home_phone: &account.home_phone,
            payment_status: account.payment_status.as_str(),
            checkin_note: account.checkin_note.as_deref(),
            member_count: account.member_count(),
            authnet: account.authnet_token,
            account: account.account_number(),
            member_names: account.member_names.join(", "),
        }
    }
}

/// One visit row; field order matches [`VISIT_HEADERS`].
#[derive(Serialize)]
struct VisitRecord<'a> {
    checkin_time: String,
    acct_id: u32,
    account_type: AccountType,
    name: &'a str,
    member_type: MemberType,
    #[serde(rename = "type")]
    kind: VisitKind,
    num_credits: u32,
}

impl<'a> VisitRecord<'a> {
    fn new(visit: &'a GeneratedVisit) -> Result<Self, ExportError> {
        Ok(Self {
            checkin_time: visit.checkin_time.format(CHECKIN_TIME_FORMAT)?,
            acct_id: visit.account_id,
            account_type: visit.account_type,
            name: &visit.name,
            member_type: visit.member_type,
            kind: visit.kind,
            num_credits: visit.num_credits,
        })
    }
}

fn csv_writer<W: io::Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer)
}

/// Writes the account table, header first.
pub fn write_accounts<W: io::Write>(
    writer: W,
    accounts: &[GeneratedAccount],
) -> Result<(), ExportError> {
    let mut csv = csv_writer(writer);
    csv.write_record(ACCOUNT_HEADERS)?;
    for account in accounts {
        csv.serialize(AccountRecord::from(account))?;
    }
    csv.flush()?;
    Ok(())
}

/// Writes the visit table, header first, in the order given.
pub fn write_visits<W: io::Write>(writer: W, visits: &[GeneratedVisit]) -> Result<(), ExportError> {
    let mut csv = csv_writer(writer);
    csv.write_record(VISIT_HEADERS)?;
    for visit in visits {
        csv.serialize(VisitRecord::new(visit)?)?;
    }
    csv.flush()?;
    Ok(())
}

/// Writes generated tables to the output directory.
pub struct CsvExporter {
    output: OutputConfig,
}

impl CsvExporter {
    /// Creates an exporter for the given output configuration.
    pub fn new(output: OutputConfig) -> Self {
        Self { output }
    }

    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    fn create(&self, path: &Path) -> Result<File, ExportError> {
        if !self.output.directory.is_dir() {
            return Err(ExportError::MissingDirectory(self.output.directory.clone()));
        }
        Ok(File::create(path)?)
    }

    /// Writes the account table and returns its path.
    pub fn export_accounts(&self, accounts: &[GeneratedAccount]) -> Result<PathBuf, ExportError> {
        let path = self.output.accounts_path();
        info!("Writing {} accounts to {}", accounts.len(), path.display());

        write_accounts(self.create(&path)?, accounts)?;

        info!("Account data generation complete: {}", path.display());
        Ok(path)
    }

    /// Writes the visit table and returns its path.
    pub fn export_visits(&self, visits: &[GeneratedVisit]) -> Result<PathBuf, ExportError> {
        let path = self.output.visits_path();
        info!("Writing {} visits to {}", visits.len(), path.display());

        write_visits(self.create(&path)?, visits)?;

        info!("Visit data generation complete: {}", path.display());
        Ok(path)
    }
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new(OutputConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{AccountGenerator, AccountRoster, Tag, VisitGenerator, sample_distinct};
    use crate::names::ListNameSource;
    use rand::{SeedableRng, rngs::StdRng};
    use std::collections::HashSet;
    use time::macros::date;

    fn sample_accounts(count: usize) -> Vec<GeneratedAccount> {
        let mut rng = StdRng::seed_from_u64(41);
        let account_gen = AccountGenerator::with_config(crate::config::AccountGenConfig {
            account_count: count,
            ..Default::default()
        });
        let names = ListNameSource::new(["Ann", "Bo"], ["Lee", "Ray"]);
        account_gen
            .generate_all(&names, date!(2024 - 10 - 01), &mut rng)
            .unwrap()
    }

    #[test]
    fn test_account_table_shape() {
        let accounts = sample_accounts(5);
        let mut buffer = Vec::new();
        write_accounts(&mut buffer, &accounts).unwrap();

        let mut reader = csv::Reader::from_reader(buffer.as_slice());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), ACCOUNT_HEADERS.to_vec());

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 5);
        for (row, account) in rows.iter().zip(&accounts) {
            assert_eq!(row.len(), ACCOUNT_HEADERS.len());
            assert_eq!(&row[0], account.id.to_string());
            assert_eq!(&row[23], account.member_count().to_string());
            assert_eq!(&row[25], account.id.to_string());
            assert_eq!(row[26].split(", ").count(), account.member_count());
        }
    }

    #[test]
    fn test_both_tags_rendered_once() {
        let mut account = sample_accounts(1).remove(0);
        let mut rng = StdRng::seed_from_u64(43);
        account.tags = sample_distinct(&Tag::ALL, 2, &mut rng).unwrap();

        let mut buffer = Vec::new();
        write_accounts(&mut buffer, &[account]).unwrap();

        let mut reader = csv::Reader::from_reader(buffer.as_slice());
        let row = reader.records().next().unwrap().unwrap();
        let tags: Vec<&str> = row[2].split(", ").collect();
        assert_eq!(tags.len(), 2);
        assert_eq!(
            tags.into_iter().collect::<HashSet<_>>(),
            HashSet::from(["Gold Pass Eligible", "Extended Membership"])
        );
    }

    #[test]
    fn test_no_tags_rendered_blank() {
        let mut account = sample_accounts(1).remove(0);
        account.tags.clear();

        let mut buffer = Vec::new();
        write_accounts(&mut buffer, &[account]).unwrap();

        let mut reader = csv::Reader::from_reader(buffer.as_slice());
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[2], "");
    }

    #[test]
    fn test_visit_table_format() {
        let accounts = sample_accounts(3);
        let roster = AccountRoster::from_accounts(&accounts);
        let mut rng = StdRng::seed_from_u64(42);
        let visits = VisitGenerator::new().generate_all(&roster, &mut rng).unwrap();

        let mut buffer = Vec::new();
        write_visits(&mut buffer, &visits).unwrap();

        let mut reader = csv::Reader::from_reader(buffer.as_slice());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), VISIT_HEADERS.to_vec());

        let first = reader.records().next().unwrap().unwrap();
        // e.g. 2024-06-01 17:04:09
        assert_eq!(first[0].len(), 19);
        assert!(["member", "guest"].contains(&&first[5]));
        assert!(["Adult", "Child", "Guest Pass"].contains(&&first[4]));
    }

    #[test]
    fn test_empty_visit_table_keeps_header() {
        let mut buffer = Vec::new();
        write_visits(&mut buffer, &[]).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text.trim_end(),
            "checkin_time,acct_id,account_type,name,member_type,type,num_credits"
        );
    }

    #[test]
    fn test_missing_directory_fails() {
        let exporter = CsvExporter::new(OutputConfig {
            directory: PathBuf::from("/nonexistent/pool-data-output"),
            ..Default::default()
        });
        let result = exporter.export_accounts(&[]);
        assert!(matches!(result, Err(ExportError::MissingDirectory(_))));
    }
}
