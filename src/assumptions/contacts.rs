//! Contact volume and channel mix (phone / web / chatbot)

use serde::{Deserialize, Serialize};

/// Days used to turn the daily contact average into a yearly volume
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Share of contacts handled by each channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelShares {
    pub phone: f64,
    pub web: f64,
    pub chatbot: f64,
}

impl ChannelShares {
    pub fn total(&self) -> f64 {
        self.phone + self.web + self.chatbot
    }

    /// Rescale proportionally when the shares exceed 100%
    ///
    /// Shares summing to 1.0 or less are returned unchanged.
    pub fn capped_at_one(self) -> Self {
        let total = self.total();
        if total > 1.0 {
            Self {
                phone: self.phone / total,
                web: self.web / total,
                chatbot: self.chatbot / total,
            }
        } else {
            self
        }
    }
}

/// Linear yearly change of each channel share
///
/// Phone and web move down by their decrease rate (a negative rate makes the
/// share grow), chatbot moves up by its increase rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelDrift {
    pub phone_decrease: f64,
    pub web_decrease: f64,
    pub chatbot_increase: f64,
}

/// Growth of the overall contact volume
///
/// The adjustment for year `y` is `initial_growth + growth_rate * y`, capped
/// at `max_growth_per_year * y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeGrowth {
    pub initial_growth: f64,
    pub growth_rate: f64,
    pub max_growth_per_year: f64,
}

impl Default for VolumeGrowth {
    fn default() -> Self {
        Self {
            initial_growth: 0.0,
            growth_rate: 0.01,
            max_growth_per_year: 0.01,
        }
    }
}

impl VolumeGrowth {
    /// No growth at all (cap is zero every year)
    pub fn none() -> Self {
        Self {
            initial_growth: 0.0,
            growth_rate: 0.0,
            max_growth_per_year: 0.0,
        }
    }

    pub fn max_growth_value(&self, year: u32) -> f64 {
        self.max_growth_per_year * year as f64
    }

    /// Growth adjustment applied to the base volume in `year`
    pub fn adjustment(&self, year: u32) -> f64 {
        let uncapped = self.initial_growth + self.growth_rate * year as f64;
        uncapped.min(self.max_growth_value(year))
    }
}

/// Contact volumes for one year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelMix {
    pub total: f64,
    pub phone: f64,
    pub web: f64,
    pub chatbot: f64,
}

impl ChannelMix {
    fn split(total: f64, shares: ChannelShares) -> Self {
        Self {
            total,
            phone: total * shares.phone,
            web: total * shares.web,
            chatbot: total * shares.chatbot,
        }
    }

    /// Sum of the three channel volumes (never more than `total`)
    pub fn channel_sum(&self) -> f64 {
        self.phone + self.web + self.chatbot
    }
}

/// Contact volume assumptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactAssumptions {
    /// Average daily phone + web contacts today
    pub avg_daily_contacts: f64,
    pub initial_shares: ChannelShares,
    pub drift: ChannelDrift,
}

impl ContactAssumptions {
    /// Yearly contact volume before any growth
    pub fn base_annual_contacts(&self) -> f64 {
        self.avg_daily_contacts * DAYS_PER_YEAR
    }

    /// Drifted and clamped shares before the 100% rescale
    pub fn drifted_shares(&self, year: u32) -> ChannelShares {
        let y = year as f64;
        ChannelShares {
            phone: (self.initial_shares.phone - self.drift.phone_decrease * y).max(0.0),
            web: (self.initial_shares.web - self.drift.web_decrease * y).max(0.0),
            chatbot: (self.initial_shares.chatbot + self.drift.chatbot_increase * y).min(1.0),
        }
    }

    /// Channel shares used for `year`
    pub fn shares(&self, year: u32) -> ChannelShares {
        self.drifted_shares(year).capped_at_one()
    }

    /// Total contacts in `year` after volume growth
    pub fn total_contacts(&self, year: u32, growth: &VolumeGrowth) -> f64 {
        self.base_annual_contacts() * (1.0 + growth.adjustment(year))
    }

    /// Contact volume per channel with the chatbot in place
    pub fn channel_mix(&self, year: u32, growth: &VolumeGrowth) -> ChannelMix {
        ChannelMix::split(self.total_contacts(year, growth), self.shares(year))
    }

    /// Contact volume per channel without the chatbot
    ///
    /// Uses today's phone and web shares of the base volume: no chatbot, no
    /// drift, no growth.
    pub fn baseline_mix(&self) -> ChannelMix {
        ChannelMix::split(
            self.base_annual_contacts(),
            ChannelShares {
                phone: self.initial_shares.phone,
                web: self.initial_shares.web,
                chatbot: 0.0,
            },
        )
    }
}
