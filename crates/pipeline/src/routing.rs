//! Team routing decision table.
//!
//! Rules are evaluated top to bottom; the first match wins.
//!
//! | urgency | persona | team |
//! |---------|---------|------|
//! | high | decision maker | Strategic sales |
//! | high | practitioner | Enterprise sales |
//! | medium | any | Sales development |
//! | low | any | Nurture Campaign |
//! | anything else | | NA |
//!
//! A high-urgency lead whose persona is neither decision maker nor
//! practitioner (including `Other`) is routed to `NA`, not to sales
//! development.

use crate::{PersonaType, Team, Urgency};

/// Routes a classified lead to a team.
///
/// Pure function of its two inputs; never looks at the summary or raw text.
pub fn route(persona_type: &PersonaType, urgency: &Urgency) -> Team {
    match (urgency, persona_type) {
        (Urgency::High, PersonaType::DecisionMaker) => Team::StrategicSales,
        (Urgency::High, PersonaType::Practitioner) => Team::EnterpriseSales,
        (Urgency::Medium, _) => Team::SalesDevelopment,
        (Urgency::Low, _) => Team::NurtureCampaign,
        _ => Team::NotAssigned,
    }
}

/// Routes from raw labels, comparing case-insensitively.
pub fn route_labels(persona_type: &str, urgency: &str) -> Team {
    route(
        &PersonaType::from_label(persona_type),
        &Urgency::from_label(urgency),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_entry_routes_to_its_literal() {
        let cases = [
            ("Decision Maker", "High", "Strategic sales"),
            ("Practitioner", "High", "Enterprise sales"),
            ("Decision Maker", "Medium", "Sales development"),
            ("Practitioner", "Medium", "Sales development"),
            ("Other", "Medium", "Sales development"),
            ("Decision Maker", "Low", "Nurture Campaign"),
            ("Practitioner", "Low", "Nurture Campaign"),
            ("Other", "Low", "Nurture Campaign"),
        ];
        for (persona, urgency, team) in cases {
            assert_eq!(
                route_labels(persona, urgency).as_str(),
                team,
                "persona={persona} urgency={urgency}"
            );
        }
    }

    #[test]
    fn high_urgency_other_persona_is_not_assigned() {
        assert_eq!(route_labels("Other", "High"), Team::NotAssigned);
        assert_eq!(route_labels("student", "High"), Team::NotAssigned);
        assert_eq!(route_labels("", "High"), Team::NotAssigned);
    }

    #[test]
    fn unmatched_combinations_fall_back_to_na() {
        let cases = [
            ("fail", "fail"),
            ("Decision Maker", "fail"),
            ("", ""),
            ("Practitioner", "urgent"),
            ("Decision Maker", " high"),
            ("Other", "other"),
        ];
        for (persona, urgency) in cases {
            assert_eq!(route_labels(persona, urgency).as_str(), "NA");
        }
    }

    #[test]
    fn matching_ignores_case() {
        assert_eq!(
            route_labels("Decision Maker", "HIGH"),
            route_labels("decision maker", "high")
        );
        assert_eq!(route_labels("PRACTITIONER", "High"), Team::EnterpriseSales);
        assert_eq!(route_labels("other", "mEdIuM"), Team::SalesDevelopment);
        assert_eq!(route_labels("x", "LOW"), Team::NurtureCampaign);
    }

    #[test]
    fn routing_is_repeatable() {
        let persona = PersonaType::Practitioner;
        let urgency = Urgency::High;
        assert_eq!(route(&persona, &urgency), route(&persona, &urgency));
    }
}
