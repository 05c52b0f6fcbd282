pub fn format_percent(fraction: f32) -> String {
    format!("{:.0}%", fraction * 100.0)
}

pub fn format_weeks(weeks: f32) -> String {
    if (weeks - weeks.round()).abs() < 0.05 {
        let whole = weeks.round();
        if whole == 1.0 {
            "1 week".to_owned()
        } else {
            format!("{whole:.0} weeks")
        }
    } else {
        format!("{weeks:.1} weeks")
    }
}

/// Counter text shown in the middle of the wheel; nothing without history.
pub fn iteration_label(count: usize) -> Option<String> {
    match count {
        0 => None,
        1 => Some("1 iteration".to_owned()),
        count => Some(format!("{count} iterations")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounds_to_whole_numbers() {
        assert_eq!(format_percent(0.25), "25%");
        assert_eq!(format_percent(0.333), "33%");
    }

    #[test]
    fn weeks_drop_needless_decimals() {
        assert_eq!(format_weeks(1.0), "1 week");
        assert_eq!(format_weeks(3.0), "3 weeks");
        assert_eq!(format_weeks(2.4), "2.4 weeks");
    }

    #[test]
    fn iteration_label_is_absent_without_history() {
        assert_eq!(iteration_label(0), None);
        assert_eq!(iteration_label(1).as_deref(), Some("1 iteration"));
        assert_eq!(iteration_label(3).as_deref(), Some("3 iterations"));
    }
}
