//! Rule evaluator: checks an aggregate against the 50/30 split and the
//! declared monthly income, producing display strings.
//!
//! The overall and per-month reports share one algorithm but differ in
//! wording and ordering: the overall block lists the 50/30 findings before
//! the income comparison, the monthly block lists the income comparison
//! first.

use crate::aggregate::SpendingTotals;

pub const NEEDS_LIMIT_PCT: f64 = 50.0;
pub const WANTS_LIMIT_PCT: f64 = 30.0;

pub const NO_INCOME_RULE_MSG: &str =
    "Monthly inflow not provided, cannot assess spending against 50/30 rule.";
pub const NO_INCOME_NET_MSG: &str =
    "Monthly inflow not provided, cannot assess spending against income.";

/// What an evaluation is about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// The whole transaction set
    Overall,
    /// A single month, carrying its label (`August 2025`)
    Month(String),
}

impl Scope {
    fn needs_warning(&self, pct: f64) -> String {
        match self {
            Scope::Overall => format!(
                "Your spending on Needs is {pct:.2}% of your inflow, which is over the recommended 50%. Consider reviewing these essential expenses."
            ),
            Scope::Month(label) => format!(
                "Warning: In {label}, your Needs spending was {pct:.2}% of your inflow, exceeding the 50% guideline."
            ),
        }
    }

    fn wants_warning(&self, pct: f64) -> String {
        match self {
            Scope::Overall => format!(
                "Your spending on Wants is {pct:.2}% of your inflow, which is over the recommended 30%. Look for areas to cut back on discretionary spending."
            ),
            Scope::Month(label) => format!(
                "Warning: In {label}, your Wants spending was {pct:.2}% of your inflow, exceeding the 30% guideline."
            ),
        }
    }

    fn adherence(&self) -> String {
        match self {
            Scope::Overall => "Great job! Your spending on Needs and Wants is within the recommended 50/30 rule relative to your inflow.".to_string(),
            Scope::Month(label) => format!(
                "Info: In {label}, your Needs and Wants spending adhered to the 50/30 rule relative to your inflow."
            ),
        }
    }

    fn over_income(&self, net: f64, income: f64) -> String {
        match self {
            Scope::Overall => format!(
                "Your total net spending (${net:.2}) exceeds your monthly inflow (${income:.2}). You are spending more than you earn."
            ),
            Scope::Month(label) => format!(
                "Warning: In {label}, your net spending (${net:.2}) exceeded your monthly inflow (${income:.2})."
            ),
        }
    }

    fn within_income(&self, net: f64, income: f64) -> String {
        match self {
            Scope::Overall => {
                let surplus = income - net;
                format!(
                    "You have a surplus of ${surplus:.2} this month. Consider saving or investing this amount."
                )
            }
            Scope::Month(label) => format!(
                "Info: In {label}, your net spending (${net:.2}) was within your monthly inflow (${income:.2})."
            ),
        }
    }

    fn income_first(&self) -> bool {
        matches!(self, Scope::Month(_))
    }
}

// NaN compares false, so it is treated as not provided.
fn income_provided(income: f64) -> bool {
    income > 0.0
}

/// 50/30 findings: either warnings, or exactly one adherence message.
pub fn check_split(totals: &SpendingTotals, income: f64, scope: &Scope) -> Vec<String> {
    let mut out = Vec::new();
    if !income_provided(income) {
        out.push(NO_INCOME_RULE_MSG.to_string());
        return out;
    }

    let needs_pct = totals.needs_spent / income * 100.0;
    let wants_pct = totals.wants_spent / income * 100.0;

    if needs_pct > NEEDS_LIMIT_PCT {
        out.push(scope.needs_warning(needs_pct));
    }
    if wants_pct > WANTS_LIMIT_PCT {
        out.push(scope.wants_warning(wants_pct));
    }
    if out.is_empty() {
        out.push(scope.adherence());
    }
    out
}

/// Net spend against income: exceeded, or within (surplus may be zero).
pub fn check_income(totals: &SpendingTotals, income: f64, scope: &Scope) -> String {
    if !income_provided(income) {
        return NO_INCOME_NET_MSG.to_string();
    }
    if totals.total_net > income {
        scope.over_income(totals.total_net, income)
    } else {
        scope.within_income(totals.total_net, income)
    }
}

/// Full evaluation for one aggregate, in the scope's fixed order.
///
/// Without a positive income this is exactly the two "not provided"
/// messages and nothing is divided.
pub fn evaluate(totals: &SpendingTotals, income: f64, scope: &Scope) -> Vec<String> {
    if !income_provided(income) {
        return vec![NO_INCOME_RULE_MSG.to_string(), NO_INCOME_NET_MSG.to_string()];
    }

    let split = check_split(totals, income, scope);
    let net = check_income(totals, income, scope);

    let mut out = Vec::with_capacity(split.len() + 1);
    if scope.income_first() {
        out.push(net);
        out.extend(split);
    } else {
        out.extend(split);
        out.push(net);
    }
    out
}
