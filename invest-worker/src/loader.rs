//! CSV catalog loader.
//!
//! Two header conventions are recognised:
//!
//! ```text
//! name,price,profit
//! Actions #,Coût par action (en euros),Bénéfice (après 2 ans)
//! ```
//!
//! `price` is in euros and `profit` is a percentage of the price, with or without a `%`
//! suffix. Rows that fail to parse are skipped with a warning and rows with a non-positive
//! price or percentage are dropped, so the solvers only ever see valid investments.
//!
//! Fields are split on `,` and quoting is not supported, so amounts must use `.` as the decimal
//! separator. A row with a different number of fields than the header is skipped.

use anyhow::{anyhow, Result};
use invest_challenges::Investment;
use invest_utils::{euros_to_cents, parse_amount, parse_ratio};
use std::{
    collections::HashSet,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};
use tracing::{debug, info, warn};

const NAME_COLUMNS: [&str; 2] = ["name", "Actions #"];
const PRICE_COLUMNS: [&str; 2] = ["price", "Coût par action (en euros)"];
const PROFIT_COLUMNS: [&str; 2] = ["profit", "Bénéfice (après 2 ans)"];

struct Columns {
    name: usize,
    price: usize,
    profit: usize,
    count: usize,
}

impl Columns {
    fn from_header(header: &str) -> Result<Self> {
        let fields: Vec<&str> = header
            .trim_start_matches('\u{feff}')
            .split(',')
            .map(str::trim)
            .collect();
        let find = |candidates: &[&str], label: &str| {
            fields
                .iter()
                .position(|f| candidates.iter().any(|c| c == f))
                .ok_or_else(|| anyhow!("Catalog is missing a {} column", label))
        };
        Ok(Self {
            name: find(&NAME_COLUMNS[..], "name")?,
            price: find(&PRICE_COLUMNS[..], "price")?,
            profit: find(&PROFIT_COLUMNS[..], "profit")?,
            count: fields.len(),
        })
    }
}

pub fn load_investments(path: &Path) -> Result<Vec<Investment>> {
    let file = File::open(path)
        .map_err(|e| anyhow!("Failed to open catalog {}: {}", path.display(), e))?;
    let investments = read_investments(BufReader::new(file))?;
    info!(
        "Loaded {} investments from {}",
        investments.len(),
        path.display()
    );
    Ok(investments)
}

pub fn read_investments<R: BufRead>(reader: R) -> Result<Vec<Investment>> {
    let mut lines = reader.lines();
    let header = match lines.next() {
        Some(line) => line?,
        None => return Err(anyhow!("Catalog is empty")),
    };
    let columns = Columns::from_header(&header)?;

    let mut investments = Vec::new();
    let mut names = HashSet::new();
    for (i, line) in lines.enumerate() {
        let line = line?;
        let line_number = i + 2;
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != columns.count {
            warn!(
                "Skipping line {}: expected {} fields, found {}",
                line_number,
                columns.count,
                fields.len()
            );
            continue;
        }
        let name = fields[columns.name];
        if name.is_empty() {
            warn!("Skipping line {}: empty name", line_number);
            continue;
        }
        let (price, ratio) = match (
            parse_amount(fields[columns.price]),
            parse_ratio(fields[columns.profit]),
        ) {
            (Ok(price), Ok(ratio)) => (price, ratio),
            (Err(e), _) | (_, Err(e)) => {
                warn!("Skipping line {}: {}", line_number, e);
                continue;
            }
        };
        if price <= 0.0 || ratio <= 0.0 {
            debug!("Dropping {}: non-positive price or profit", name);
            continue;
        }
        if !names.insert(name.to_string()) {
            warn!("Skipping line {}: duplicate name {}", line_number, name);
            continue;
        }

        investments.push(Investment::new(name, euros_to_cents(price)?, price * ratio));
    }
    Ok(investments)
}
