//! Tailorbill Status Tool
//!
//! Provides runtime status information about the tailorbill service.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::config::Settings;

/// Pipeline usage instructions for AI assistants
pub const PIPELINE_INSTRUCTIONS: &str = r#"
# Tailorbill Pipeline Instructions

Tailorbill normalizes tailoring-shop orders and measurements. Every tool is a
pure transformation: nothing is stored, and the same input always gives the
same output.

---

## Orders

Order rows are JSON objects as stored by the shop:

```json
{
  "id": 5924,
  "billnumberinput2": "8051",
  "garment_type": "Pant, Shirt",
  "total_amt": 1300,
  "bill_id": 102,
  "customer_name": "Ravi"
}
```

Numbers may be given as strings. Missing amounts count as 0. Nulls and fields the
pipeline does not use are passed through untouched.

### split_orders

One order row may hold several garments ("Pant, Shirt"). `split_orders`
turns it into one line item per garment:

- `expanded_id`: `"{id}_split_{index}"`
- `garment_index`: 0-based position in the label
- `original_id`: the order the line came from
- `total_amt`: the order amount divided equally, rounded to 2 decimals

Line items come back newest bill first, then newest order first, then in
garment order. Rounding can leave a paisa or two of difference on 3+ way
splits; this is expected.

### reconcile_orders

Totals orders into the six itemized bill rows:

| Row | Matches (case-insensitive, first match wins) |
|---|---|
| Suit | "suit" |
| Safari/Jacket | "safari" or "jacket" |
| Pant | "pant" |
| N.Shirt | "n.shirt" |
| Shirt | "shirt" |
| Sadri | "sadri" |

Orders that match nothing are listed under `unclassified` with their total in
`unclassified_amt`. Pass `split: false` to total rows as given (for rows that
are already line items).

### check_itemized_bill

Compares a stored itemized bill (`suit_qty`, `suit_amount`, ... `sadri_amount`,
optional `total_qty`/`total_amt`) against the bill's orders. Each row that
disagrees is reported as a discrepancy; nothing is corrected. Pass `advance`
to also get the balance due.

### number_garments

Labels garments for work sheets: two pants on one bill become "Pant 1" and
"Pant 2". Also returns how many workers may be assigned (3 for shirts,
otherwise 2).

---

## Measurements

### parse_measurement

- `mode: "numeric"` for lengths and widths. Accepts `35.5`, `36`, `3/4`,
  `35 1/2` and shop notation `22/7/2` (= 22 + 7/2 = 25.5). Anything else
  returns `valid: false`, value 0, and the original text for redisplay.
  An empty field is a valid 0.
- `mode: "text"` for descriptive notes. Fractions inside the text become
  decimals: `"2 1/2 inch loose"` -> `"2.5 inch loose"`.

### format_measurement

Stored decimal -> display: `35.5` -> `"35 1/2"`. Values near an eighth snap to
it; anything else shows as a plain decimal (`0.3333`). With `stored: true`, 0
displays as an empty field.

### normalize_measurements

Normalizes a whole sheet. Pass the sheet as `fields` (name -> entered text)
and list which names are numeric in `numeric_fields`. Unreadable numeric
fields are listed in `rejected` and stored as 0.
"#;

#[derive(Debug, Clone, Serialize)]
pub struct TailorbillStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Active settings
    pub settings: Settings,

    /// Process information
    pub started_at: String,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    started_at: DateTime<Local>,
    settings: Settings,
}

impl StatusTracker {
    /// Create a new status tracker
    pub fn new(settings: Settings) -> Self {
        Self {
            start_time: Instant::now(),
            started_at: Local::now(),
            settings,
        }
    }

    /// Get the current status
    pub fn get_status(&self) -> TailorbillStatus {
        let build_info = BuildInfo::current();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        TailorbillStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            settings: self.settings,
            started_at: self.started_at.to_rfc3339(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
