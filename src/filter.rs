pub const ALL: &str = "all";

pub const VISIBLE_OPACITY: &str = "1";
pub const VISIBLE_TRANSFORM: &str = "scale(1)";
pub const HIDDEN_OPACITY: &str = "0";
pub const HIDDEN_TRANSFORM: &str = "scale(0.95)";

pub fn card_matches(filter: &str, category: &str) -> bool {
    filter == ALL || filter == category
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardTransition {
    Show,
    Hide,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardPlan {
    pub card: usize,
    pub transition: CardTransition,
    pub generation: u64,
}

/// Active category plus one generation counter per card, so the delayed half
/// of a transition can tell whether a later click has superseded it.
#[derive(Debug)]
pub struct FilterState {
    active: String,
    card_generations: Vec<u64>,
}

impl FilterState {
    pub fn new(card_count: usize) -> Self {
        Self {
            active: ALL.to_string(),
            card_generations: vec![0; card_count],
        }
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    pub fn activate<'a, I>(&mut self, filter: &str, categories: I) -> Vec<CardPlan>
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.active = filter.to_string();

        categories
            .into_iter()
            .zip(self.card_generations.iter_mut())
            .enumerate()
            .map(|(card, (category, generation))| {
                *generation = generation.wrapping_add(1);
                let transition = if card_matches(filter, category) {
                    CardTransition::Show
                } else {
                    CardTransition::Hide
                };

                CardPlan {
                    card,
                    transition,
                    generation: *generation,
                }
            })
            .collect()
    }

    pub fn is_current(&self, card: usize, generation: u64) -> bool {
        self.card_generations.get(card) == Some(&generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_matches_every_category() {
        assert!(card_matches(ALL, "industrial"));
        assert!(card_matches("industrial", "industrial"));
        assert!(!card_matches("industrial", "mineria"));
    }

    #[test]
    fn activate_plans_one_transition_per_card() {
        let mut state = FilterState::new(3);

        let plans = state.activate("mineria", ["industrial", "mineria", "energia"]);

        assert_eq!(state.active(), "mineria");
        let transitions: Vec<CardTransition> = plans.iter().map(|plan| plan.transition).collect();
        assert_eq!(
            transitions,
            vec![CardTransition::Hide, CardTransition::Show, CardTransition::Hide]
        );
    }

    #[test]
    fn later_click_supersedes_pending_generation() {
        let mut state = FilterState::new(1);

        let first = state.activate("mineria", ["industrial"]);
        let second = state.activate(ALL, ["industrial"]);

        assert!(!state.is_current(0, first[0].generation));
        assert!(state.is_current(0, second[0].generation));
        assert!(!state.is_current(5, second[0].generation));
    }
}
