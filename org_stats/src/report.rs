use crate::aggregator::{ContributorTotals, OrganizationAggregate};
use std::fmt::Display;

const RULE: &str = "============================================================";
const HEADER: &str = "UserLogin: Commit[Count] Addition[Count] Deletion[Count]";

impl Display for ContributorTotals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: c[{}] a[{}] d[{}]",
            self.login, self.commits, self.additions, self.deletions
        )
    }
}

/// Plain text table, one contributor per line in login order.
impl Display for OrganizationAggregate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", RULE)?;
        writeln!(f, "{}", HEADER)?;
        writeln!(f, "{}", RULE)?;
        for totals in self.iter() {
            writeln!(f, "{}", totals)?;
        }
        writeln!(f, "{}", RULE)
    }
}
