//! Named per-year metrics in display units

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::records::{YearRow, MILLION};

/// A plottable column of the projection table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    TotalContacts,
    PhoneContacts,
    WebContacts,
    ChatbotContacts,
    NewCustomers,
    RetentionProfit,
    ChatbotSavings,
    Costs,
    NetProfit,
    CumulativeCosts,
    CumulativeProfit,
    Roi,
}

impl Metric {
    pub const ALL: [Metric; 12] = [
        Metric::TotalContacts,
        Metric::PhoneContacts,
        Metric::WebContacts,
        Metric::ChatbotContacts,
        Metric::NewCustomers,
        Metric::RetentionProfit,
        Metric::ChatbotSavings,
        Metric::Costs,
        Metric::NetProfit,
        Metric::CumulativeCosts,
        Metric::CumulativeProfit,
        Metric::Roi,
    ];

    /// Column heading with its unit
    pub fn label(&self) -> &'static str {
        match self {
            Metric::TotalContacts => "Total Contacts (M)",
            Metric::PhoneContacts => "Phone Contacts (M)",
            Metric::WebContacts => "Web Contacts (M)",
            Metric::ChatbotContacts => "Chatbot Contacts (M)",
            Metric::NewCustomers => "New Customers (M)",
            Metric::RetentionProfit => "Retention Profit (€M)",
            Metric::ChatbotSavings => "Chatbot Savings (€M)",
            Metric::Costs => "Costs (€M)",
            Metric::NetProfit => "Net Profit (€M)",
            Metric::CumulativeCosts => "Cumulative Costs (€M)",
            Metric::CumulativeProfit => "Cumulative Profit (€M)",
            Metric::Roi => "ROI (%)",
        }
    }

    /// Snake-case name accepted on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Metric::TotalContacts => "total_contacts",
            Metric::PhoneContacts => "phone_contacts",
            Metric::WebContacts => "web_contacts",
            Metric::ChatbotContacts => "chatbot_contacts",
            Metric::NewCustomers => "new_customers",
            Metric::RetentionProfit => "retention_profit",
            Metric::ChatbotSavings => "chatbot_savings",
            Metric::Costs => "costs",
            Metric::NetProfit => "net_profit",
            Metric::CumulativeCosts => "cumulative_costs",
            Metric::CumulativeProfit => "cumulative_profit",
            Metric::Roi => "roi",
        }
    }

    /// True for metrics that only exist when the chatbot is modeled
    pub fn is_financial(&self) -> bool {
        !matches!(
            self,
            Metric::TotalContacts | Metric::PhoneContacts | Metric::WebContacts | Metric::ChatbotContacts
        )
    }

    /// Value for a row in display units (millions, ROI in percent)
    pub fn value(&self, row: &YearRow) -> Option<f64> {
        let f = row.financials.as_ref();
        let raw = match self {
            Metric::TotalContacts => row.total_contacts,
            Metric::PhoneContacts => row.phone_contacts,
            Metric::WebContacts => row.web_contacts,
            Metric::ChatbotContacts => row.chatbot_contacts,
            Metric::NewCustomers => f?.new_customers,
            Metric::RetentionProfit => f?.retention_profit,
            Metric::ChatbotSavings => f?.chatbot_savings,
            Metric::Costs => f?.costs,
            Metric::NetProfit => f?.net_profit,
            Metric::CumulativeCosts => f?.cumulative_costs,
            Metric::CumulativeProfit => f?.cumulative_profit,
            Metric::Roi => return f.map(|f| f.roi_pct),
        };
        Some(raw / MILLION)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Metric {
    type Err = String;

    /// Accepts the snake-case name or the full column heading
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Metric::ALL
            .iter()
            .copied()
            .find(|m| m.name().eq_ignore_ascii_case(wanted) || m.label() == wanted)
            .ok_or_else(|| {
                let names: Vec<_> = Metric::ALL.iter().map(|m| m.name()).collect();
                format!("unknown metric '{}', expected one of: {}", s, names.join(", "))
            })
    }
}
