// Result codes the scheduler is known to reply with.

const KNOWN_CODES: &[(&str, &str)] = &[
    ("0", "success"),
    ("1", "internal error"),
    ("400", "bad request"),
    ("404", "not found"),
    ("500", "internal server error"),
    ("10101", "make flow failed"),
    ("10102", "only one root task in a flow"),
    ("10103", "DAG flow validate failed"),
    ("10104", "task's define error"),
    ("10105", "specified script is not exist"),
    ("10106", "specified script is not executables"),
    ("10107", "only one parent task can be defined"),
    ("11001", "invalid parameter"),
    ("11002", "invalid request"),
    ("11003", "specified flow is not exist"),
    ("11004", "specified task is not exist"),
    ("11005", "specified flow is already running or skipped"),
    ("11006", "specified task is already running or skipped"),
    ("11007", "unsupported action"),
    ("11008", "can not abort flow"),
];

/// Canonical description for a result code, if the code is a known one.
pub fn describe(code: &str) -> Option<&'static str> {
    KNOWN_CODES
        .iter()
        .find(|(c, _)| *c == code.trim())
        .map(|(_, desc)| *desc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_known_and_unknown() {
        assert_eq!(describe("11003"), Some("specified flow is not exist"));
        assert_eq!(describe(" 0 "), Some("success"));
        assert_eq!(describe("3"), None);
    }
}
