//! Carbon footprint estimator
//!
//! Additive model over four habit categories, in kg CO2 per day. Values outside
//! a category's known options are priced with that category's default, so an
//! estimate never silently drops a category.

use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transport {
    #[default]
    Car,
    Bike,
    Walk,
    Public,
}

impl Transport {
    pub fn daily_kg(self) -> f64 {
        match self {
            Self::Car => 6.5,
            Self::Bike | Self::Walk => 0.0,
            Self::Public => 2.1,
        }
    }
}

impl FromStr for Transport {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "car" => Ok(Self::Car),
            "bike" => Ok(Self::Bike),
            "walk" => Ok(Self::Walk),
            "public" => Ok(Self::Public),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Diet {
    #[default]
    Meat,
    Vegetarian,
    Vegan,
    Pescatarian,
}

impl Diet {
    pub fn daily_kg(self) -> f64 {
        match self {
            Self::Meat => 7.2,
            Self::Vegetarian => 3.8,
            Self::Vegan => 2.9,
            Self::Pescatarian => 4.1,
        }
    }
}

impl FromStr for Diet {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "meat" => Ok(Self::Meat),
            "vegetarian" => Ok(Self::Vegetarian),
            "vegan" => Ok(Self::Vegan),
            "pescatarian" => Ok(Self::Pescatarian),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnergyUsage {
    Low,
    #[default]
    Medium,
    High,
}

impl EnergyUsage {
    pub fn daily_kg(self) -> f64 {
        match self {
            Self::Low => 2.1,
            Self::Medium => 4.8,
            Self::High => 8.2,
        }
    }
}

impl FromStr for EnergyUsage {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WasteHabits {
    Minimal,
    #[default]
    Average,
    High,
}

impl WasteHabits {
    pub fn daily_kg(self) -> f64 {
        match self {
            Self::Minimal => 0.8,
            Self::Average => 2.3,
            Self::High => 4.1,
        }
    }
}

impl FromStr for WasteHabits {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minimal" => Ok(Self::Minimal),
            "average" => Ok(Self::Average),
            "high" => Ok(Self::High),
            _ => Err(()),
        }
    }
}

pub const SUGGEST_TRANSPORT: &str = "🚴 Try biking or walking for short trips - save 6.5kg CO2/day";
pub const SUGGEST_DIET: &str = "🥗 Reduce meat consumption 2-3 days/week - save up to 3kg CO2/day";
pub const SUGGEST_ENERGY: &str = "💡 Switch to LED bulbs and unplug devices - save 2-4kg CO2/day";
pub const SUGGEST_WASTE: &str = "♻️ Start composting and reduce packaging - save 1-2kg CO2/day";

/// Result of a footprint estimate
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactEstimate {
    pub daily_co2: f64,
    pub weekly_co2: f64,
    pub yearly_co2: f64,
    pub suggestions: Vec<String>,
}

/// Price a value, falling back to the category default when it is unknown
fn priced<T: FromStr + Default>(value: &str, daily_kg: fn(T) -> f64) -> f64 {
    daily_kg(value.parse().unwrap_or_default())
}

/// Daily footprint in kg CO2
pub fn daily_co2(transport: &str, diet: &str, energy_usage: &str, waste_habits: &str) -> f64 {
    priced(transport, Transport::daily_kg)
        + priced(diet, Diet::daily_kg)
        + priced(energy_usage, EnergyUsage::daily_kg)
        + priced(waste_habits, WasteHabits::daily_kg)
}

/// Improvement suggestions, in fixed category order
pub fn suggestions(transport: &str, diet: &str, energy_usage: &str, waste_habits: &str) -> Vec<String> {
    [
        (transport.parse::<Transport>() == Ok(Transport::Car), SUGGEST_TRANSPORT),
        (diet.parse::<Diet>() == Ok(Diet::Meat), SUGGEST_DIET),
        (energy_usage.parse::<EnergyUsage>() == Ok(EnergyUsage::High), SUGGEST_ENERGY),
        (waste_habits.parse::<WasteHabits>() == Ok(WasteHabits::High), SUGGEST_WASTE),
    ]
    .into_iter()
    .filter(|(applies, _)| *applies)
    .map(|(_, text)| text.to_string())
    .collect()
}

/// Full estimate: daily, weekly (×7) and yearly (×365) totals plus suggestions
pub fn estimate(transport: &str, diet: &str, energy_usage: &str, waste_habits: &str) -> ImpactEstimate {
    let daily = daily_co2(transport, diet, energy_usage, waste_habits);
    ImpactEstimate {
        daily_co2: daily,
        weekly_co2: daily * 7.0,
        yearly_co2: daily * 365.0,
        suggestions: suggestions(transport, diet, energy_usage, waste_habits),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRANSPORTS: [&str; 4] = ["car", "bike", "walk", "public"];
    const DIETS: [&str; 4] = ["meat", "vegetarian", "vegan", "pescatarian"];
    const ENERGY: [&str; 3] = ["low", "medium", "high"];
    const WASTE: [&str; 3] = ["minimal", "average", "high"];

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 0.1
    }

    #[test]
    fn test_worst_case_habits() {
        let estimate = estimate("car", "meat", "high", "high");
        assert!(close(estimate.daily_co2, 26.0));
        assert_eq!(estimate.suggestions.len(), 4);
        assert_eq!(
            estimate.suggestions,
            vec![SUGGEST_TRANSPORT, SUGGEST_DIET, SUGGEST_ENERGY, SUGGEST_WASTE]
        );
    }

    #[test]
    fn test_best_case_habits() {
        let estimate = estimate("bike", "vegan", "low", "minimal");
        assert!(close(estimate.daily_co2, 5.8));
        assert!(estimate.suggestions.is_empty());
    }

    #[test]
    fn test_weekly_and_yearly_scale_for_every_combination() {
        for t in TRANSPORTS {
            for d in DIETS {
                for e in ENERGY {
                    for w in WASTE {
                        let estimate = estimate(t, d, e, w);
                        assert!(close(estimate.weekly_co2, estimate.daily_co2 * 7.0));
                        assert!(close(estimate.yearly_co2, estimate.daily_co2 * 365.0));
                    }
                }
            }
        }
    }

    #[test]
    fn test_unknown_values_use_category_defaults() {
        assert!(close(priced("hoverboard", Transport::daily_kg), 6.5));
        assert!(close(priced("", Diet::daily_kg), 7.2));
        assert!(close(priced("nuclear", EnergyUsage::daily_kg), 4.8));
        assert!(close(priced("???", WasteHabits::daily_kg), 2.3));

        let estimate = estimate("hoverboard", "vegan", "low", "minimal");
        assert!(close(estimate.daily_co2, 6.5 + 2.9 + 2.1 + 0.8));
    }

    #[test]
    fn test_unknown_values_do_not_trigger_suggestions() {
        // Defaults drive the number, not the advice
        let estimate = estimate("hoverboard", "omnivore", "extreme", "lots");
        assert!(close(estimate.daily_co2, 6.5 + 7.2 + 4.8 + 2.3));
        assert!(estimate.suggestions.is_empty());
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert!(suggestions("Car", "meat", "low", "minimal") == vec![SUGGEST_DIET.to_string()]);
        assert!(close(daily_co2("Bike", "vegan", "low", "minimal"), 6.5 + 2.9 + 2.1 + 0.8));
    }

    #[test]
    fn test_public_transport_mixed_habits() {
        let estimate = estimate("public", "pescatarian", "high", "average");
        assert!(close(estimate.daily_co2, 2.1 + 4.1 + 8.2 + 2.3));
        assert_eq!(estimate.suggestions, vec![SUGGEST_ENERGY.to_string()]);
    }
}
