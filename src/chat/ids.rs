use chrono::{DateTime, Local};

/// Produces `msg-<millis>-<seq>` identifiers
///
/// Ids are strictly increasing by `(millis, seq)` within one generator,
/// including several sends in the same millisecond or a clock stepping
/// backwards.
#[derive(Debug, Clone, Default)]
pub struct MessageIdGenerator {
    last_millis: i64,
    seq: u32,
}

impl MessageIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self, now: DateTime<Local>) -> String {
        let millis = now.timestamp_millis();
        if millis > self.last_millis {
            self.last_millis = millis;
            self.seq = 0;
        } else {
            self.seq += 1;
        }
        format!("msg-{}-{}", self.last_millis, self.seq)
    }
}

/// Split an id produced by [`MessageIdGenerator`] into its ordering key
pub fn parse_id(id: &str) -> Option<(i64, u32)> {
    let rest = id.strip_prefix("msg-")?;
    let (millis, seq) = rest.split_once('-')?;
    Some((millis.parse().ok()?, seq.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(millis: i64) -> DateTime<Local> {
        Local.timestamp_millis_opt(millis).unwrap()
    }

    #[test]
    fn test_same_millisecond_gets_new_sequence() {
        let mut ids = MessageIdGenerator::new();
        let now = at(1_700_000_000_000);

        assert_eq!(ids.next_id(now), "msg-1700000000000-0");
        assert_eq!(ids.next_id(now), "msg-1700000000000-1");
        assert_eq!(ids.next_id(now + Duration::milliseconds(1)), "msg-1700000000001-0");
    }

    #[test]
    fn test_clock_going_back_stays_monotonic() {
        let mut ids = MessageIdGenerator::new();
        let first = ids.next_id(at(1_700_000_000_500));
        let second = ids.next_id(at(1_700_000_000_100));

        assert!(parse_id(&second).unwrap() > parse_id(&first).unwrap());
    }

    #[test]
    fn test_parse_id_rejects_foreign_ids() {
        assert_eq!(parse_id("msg-12-3"), Some((12, 3)));
        assert_eq!(parse_id("msg-c-1"), None);
        assert_eq!(parse_id("other"), None);
    }
}
