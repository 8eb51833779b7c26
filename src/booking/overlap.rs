//! Interval overlap tests for screenings and rental date ranges

use chrono::{DateTime, Duration, NaiveDate, Utc};

/// A screening reduced to what the overlap check needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Screening {
    /// `None` for a schedule that is not stored yet
    pub id: Option<i32>,
    pub date: DateTime<Utc>,
    pub duration_minutes: i32,
}

impl Screening {
    /// End of the screening, cleaning buffer included
    pub fn end(&self, buffer_minutes: i64) -> DateTime<Utc> {
        self.date + Duration::minutes(self.duration_minutes as i64 + buffer_minutes)
    }
}

/// Whether `candidate` collides with any of `existing`.
///
/// `existing` must already be restricted to the schedules sharing the
/// overlap key (same movie or same auditorium). Bounds are inclusive: a
/// screening starting exactly when another one ends still overlaps.
pub fn does_overlap(candidate: &Screening, existing: &[Screening], buffer_minutes: i64) -> bool {
    let end = candidate.end(buffer_minutes);
    existing
        .iter()
        .filter(|s| candidate.id.is_none() || s.id != candidate.id)
        .any(|s| s.date <= end && s.end(buffer_minutes) >= candidate.date)
}

/// Inclusive date-range intersection
pub fn ranges_overlap(
    start: NaiveDate,
    end: NaiveDate,
    block_start: NaiveDate,
    block_end: NaiveDate,
) -> bool {
    start <= block_end && end >= block_start
}

/// True when no block intersects `[start, end]`
pub fn is_range_free(start: NaiveDate, end: NaiveDate, blocks: &[(NaiveDate, NaiveDate)]) -> bool {
    !blocks
        .iter()
        .any(|&(block_start, block_end)| ranges_overlap(start, end, block_start, block_end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, h, m, 0).unwrap()
    }

    fn screening(id: i32, date: DateTime<Utc>, duration: i32) -> Screening {
        Screening {
            id: Some(id),
            date,
            duration_minutes: duration,
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 7, d).unwrap()
    }

    #[test]
    fn screening_end_includes_buffer() {
        let s = screening(1, at(10, 0), 90);
        assert_eq!(s.end(30), at(12, 0));
    }

    #[test]
    fn overlapping_screenings_are_detected() {
        let existing = [screening(1, at(10, 0), 90)];
        let candidate = Screening {
            id: None,
            date: at(11, 0),
            duration_minutes: 90,
        };
        assert!(does_overlap(&candidate, &existing, 30));
    }

    #[test]
    fn back_to_back_screenings_touch_at_the_boundary() {
        // 10:00 + 90 + 30 = 12:00, inclusive comparison
        let existing = [screening(1, at(10, 0), 90)];
        let touching = Screening {
            id: None,
            date: at(12, 0),
            duration_minutes: 90,
        };
        let after = Screening {
            id: None,
            date: at(12, 1),
            duration_minutes: 90,
        };
        assert!(does_overlap(&touching, &existing, 30));
        assert!(!does_overlap(&after, &existing, 30));
    }

    #[test]
    fn candidate_ending_before_existing_start_is_free() {
        let existing = [screening(1, at(15, 0), 120)];
        let candidate = Screening {
            id: None,
            date: at(12, 0),
            duration_minutes: 90,
        };
        // 12:00 + 120 = 14:00 < 15:00
        assert!(!does_overlap(&candidate, &existing, 30));
    }

    #[test]
    fn schedule_does_not_overlap_itself() {
        let existing = [screening(7, at(10, 0), 90)];
        let moved = screening(7, at(10, 30), 90);
        assert!(!does_overlap(&moved, &existing, 30));
    }

    #[test]
    fn overlap_matches_interval_intersection() {
        let base = at(9, 0);
        for offset in (-300i64..=300).step_by(15) {
            let other = base + Duration::minutes(offset);
            let a = screening(1, base, 60);
            let b = Screening {
                id: None,
                date: other,
                duration_minutes: 45,
            };
            let intersects = a.date <= b.end(30) && b.date <= a.end(30);
            assert_eq!(does_overlap(&b, &[a], 30), intersects, "offset {}", offset);
        }
    }

    #[test]
    fn date_ranges_overlap_inclusively() {
        assert!(ranges_overlap(day(1), day(5), day(5), day(9)));
        assert!(ranges_overlap(day(3), day(4), day(1), day(9)));
        assert!(!ranges_overlap(day(1), day(4), day(5), day(9)));
        assert!(!ranges_overlap(day(10), day(12), day(5), day(9)));
    }

    #[test]
    fn free_range_checks_every_block() {
        let blocks = [(day(1), day(3)), (day(10), day(14))];
        assert!(is_range_free(day(4), day(9), &blocks));
        assert!(!is_range_free(day(4), day(10), &blocks));
        assert!(!is_range_free(day(2), day(2), &blocks));
        assert!(is_range_free(day(20), day(25), &[]));
    }
}
