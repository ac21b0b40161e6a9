use super::card::{Card, ElementType, Rarity};
use super::factory::{generate_card, generate_card_with_rarity, random_element};
use crate::game::rng::GameRng;
use crate::game::state::{AiDifficulty, Side};

/// Number of cards in every generated deck.
pub const DECK_SIZE: usize = 20;

/// Hard-difficulty decks focus on this many primary types.
const PRIMARY_TYPE_COUNT: usize = 3;
/// Chance that a hard-deck slot uses a primary type.
const PRIMARY_TYPE_CHANCE: f64 = 0.7;
/// Balanced decks seed this many cards of every type first.
const PER_TYPE_MINIMUM: usize = 2;
/// Epic cards the human deck should end up with.
const TARGET_EPICS: usize = 2;

/// A deck of 20 cards, drawn from the front.
#[derive(Debug, Clone)]
pub struct Deck {
    pub cards: Vec<Card>,
}

#[derive(Debug)]
pub enum DeckError {
    WrongSize { actual: usize },
}

impl std::fmt::Display for DeckError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeckError::WrongSize { actual } => {
                write!(f, "Deck has {} cards, expected {}", actual, DECK_SIZE)
            }
        }
    }
}

impl std::error::Error for DeckError {}

impl Deck {
    pub fn new(cards: Vec<Card>) -> Result<Self, DeckError> {
        let deck = Deck { cards };
        deck.validate()?;
        Ok(deck)
    }

    /// Create a deck without validation (for testing).
    pub fn new_unchecked(cards: Vec<Card>) -> Self {
        Deck { cards }
    }

    pub fn validate(&self) -> Result<(), DeckError> {
        if self.cards.len() != DECK_SIZE {
            return Err(DeckError::WrongSize {
                actual: self.cards.len(),
            });
        }
        Ok(())
    }

    pub fn rarity_count(&self, rarity: Rarity) -> usize {
        self.cards.iter().filter(|c| c.rarity == rarity).count()
    }

    pub fn element_count(&self, element: ElementType) -> usize {
        self.cards.iter().filter(|c| c.element == element).count()
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}

/// Build a 20-card deck for `owner`.
///
/// The hard computer gets a deck biased toward three random primary types;
/// everyone else gets two cards of every type plus eight random ones. The
/// human deck is then patched to hold a legendary and (approximately) two
/// epics.
pub fn generate_deck(owner: Side, difficulty: AiDifficulty, rng: &mut GameRng) -> Deck {
    let mut cards = if owner == Side::Computer && difficulty == AiDifficulty::Hard {
        focused_cards(owner, rng)
    } else {
        balanced_cards(owner, rng)
    };

    if owner == Side::Player {
        ensure_rarities(&mut cards, owner, rng);
    }

    Deck::new_unchecked(cards)
}

fn focused_cards(owner: Side, rng: &mut GameRng) -> Vec<Card> {
    let mut types = ElementType::all().to_vec();
    rng.shuffle(&mut types);
    types.truncate(PRIMARY_TYPE_COUNT);

    (0..DECK_SIZE)
        .map(|_| {
            if rng.chance(PRIMARY_TYPE_CHANCE) {
                let element = types[rng.gen_range(0, types.len())];
                generate_card(owner, Some(element), rng)
            } else {
                generate_card(owner, None, rng)
            }
        })
        .collect()
}

fn balanced_cards(owner: Side, rng: &mut GameRng) -> Vec<Card> {
    let mut cards = Vec::with_capacity(DECK_SIZE);
    for &element in ElementType::all() {
        for _ in 0..PER_TYPE_MINIMUM {
            cards.push(generate_card(owner, Some(element), rng));
        }
    }
    while cards.len() < DECK_SIZE {
        cards.push(generate_card(owner, None, rng));
    }
    cards
}

/// Overwrite random slots so the deck holds a legendary and up to two epics.
///
/// Both counts are taken before any overwrite. An epic overwrite that lands
/// on a legendary slot is skipped, not retried, so the epic count is only
/// approximately guaranteed.
fn ensure_rarities(cards: &mut [Card], owner: Side, rng: &mut GameRng) {
    let has_legendary = cards.iter().any(|c| c.rarity == Rarity::Legendary);
    let epic_count = cards.iter().filter(|c| c.rarity == Rarity::Epic).count();

    if !has_legendary {
        let idx = rng.gen_range(0, cards.len());
        let element = random_element(rng);
        let mut legendary = generate_card_with_rarity(owner, element, Rarity::Legendary, rng);
        legendary.attack = legendary.attack.max(8);
        legendary.defense = legendary.defense.max(5);
        tracing::debug!(slot = idx, card = %legendary.name, "forced legendary into player deck");
        cards[idx] = legendary;
    }

    for _ in epic_count..TARGET_EPICS {
        let idx = rng.gen_range(0, cards.len());
        if cards[idx].rarity == Rarity::Legendary {
            continue;
        }
        let element = random_element(rng);
        let mut epic = generate_card_with_rarity(owner, element, Rarity::Epic, rng);
        epic.attack = epic.attack.max(6);
        epic.defense = epic.defense.max(3);
        tracing::debug!(slot = idx, card = %epic.name, "forced epic into player deck");
        cards[idx] = epic;
    }
}
