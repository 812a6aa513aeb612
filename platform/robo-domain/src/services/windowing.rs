use crate::value_objects::date_window::{weeks_before, DateWindow};
use crate::value_objects::price_record::PriceRecord;
use chrono::NaiveDate;

/// Lookbacks of the four trend windows, newest first.
pub const TRAILING_WEEKS: [u32; 4] = [8, 16, 32, 64];
pub const FIFTY_TWO_WEEKS: u32 = 52;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabeledWindow {
    pub weeks: u32,
    pub window: DateWindow,
}

impl LabeledWindow {
    pub fn label(&self) -> String {
        format!("{}w", self.weeks)
    }
}

pub fn records_in<'a>(records: &'a [PriceRecord], window: &DateWindow) -> Vec<&'a PriceRecord> {
    records.iter().filter(|r| window.contains(r.date)).collect()
}

/// Records dated within `[upper_bound - weeks_back weeks, upper_bound]`.
pub fn window_for(
    records: &[PriceRecord],
    upper_bound: NaiveDate,
    weeks_back: u32,
) -> Vec<&PriceRecord> {
    records_in(records, &DateWindow::trailing(upper_bound, weeks_back))
}

/// Builds windows that abut one another going back from `as_of`.
///
/// The first window is `[as_of - weeks[0], as_of]`. Every following window
/// ends where the previous one starts and excludes that date, so the result
/// partitions `[as_of - weeks[N-1], as_of]`. `weeks` must be strictly
/// increasing; otherwise the out-of-order windows come back empty.
pub fn abutting_windows<const N: usize>(as_of: NaiveDate, weeks: [u32; N]) -> [LabeledWindow; N] {
    let mut previous_lower: Option<NaiveDate> = None;
    weeks.map(|weeks_back| {
        let lower = weeks_before(as_of, weeks_back);
        let window = match previous_lower {
            None => DateWindow::closed(lower, as_of),
            Some(upper) => DateWindow::half_open(lower, upper),
        };
        previous_lower = Some(lower);
        LabeledWindow {
            weeks: weeks_back,
            window,
        }
    })
}

pub fn trailing_windows(as_of: NaiveDate) -> [LabeledWindow; 4] {
    abutting_windows(as_of, TRAILING_WEEKS)
}
