//! Dialogue engine integration tests
//!
//! Drives whole sessions through a scripted voice and checks what was said

use std::cell::Cell;
use std::collections::HashSet;
use std::io::Write;

use kitchen_assistant::dialogue::phrases;
use kitchen_assistant::{
    Catalog, DialogueSettings, IngredientSource, Recipe, Session, SessionEnd, StaticPantry,
    default_kitchen, load_catalog,
};

mod common;
use common::{ScriptedVoice, test_catalog};

async fn run_session(
    voice: &mut ScriptedVoice,
    catalog: &Catalog,
    pantry: &dyn IngredientSource,
    settings: &DialogueSettings,
) -> SessionEnd {
    Session::new(voice, catalog, pantry, settings).run().await
}

fn soup_pantry() -> StaticPantry {
    StaticPantry::new(["tomato", "salt"])
}

#[tokio::test]
async fn test_mode_select_reprompts_then_recommended_misspelling() {
    let mut voice = ScriptedVoice::new(&["banana", "recomended", "tomato", "no"]);
    let end = run_session(
        &mut voice,
        &test_catalog(),
        &soup_pantry(),
        &DialogueSettings::default(),
    )
    .await;

    assert_eq!(end, SessionEnd::UserExit);
    assert_eq!(voice.count(phrases::MODE_PROMPT), 2);
    assert_eq!(voice.count(phrases::MODE_CLARIFY), 1);
    assert_eq!(voice.count(phrases::CHECKING_PANTRY), 1);
    assert_eq!(voice.count(phrases::SPECIFIC_PROMPT), 0);
}

#[tokio::test]
async fn test_specific_lookup_reads_recipe() {
    let mut voice = ScriptedVoice::new(&["specific", "carbonara", "no"]);
    let end = run_session(
        &mut voice,
        &test_catalog(),
        &default_kitchen(),
        &DialogueSettings::default(),
    )
    .await;

    assert_eq!(end, SessionEnd::UserExit);
    assert_eq!(
        voice.spoken,
        [
            phrases::GREETING,
            phrases::MODE_PROMPT,
            phrases::SPECIFIC_PROMPT,
            "I found the recipe for Spaghetti Carbonara.",
            "You'll need the following ingredients:",
            "pasta, eggs, bacon, cheese",
            "Here are the instructions:",
            "Cook pasta, mix with eggs and bacon.",
            phrases::REPEAT_PROMPT,
            phrases::FINISHED,
        ]
    );
}

#[tokio::test]
async fn test_repeat_twice_then_finish() {
    let mut voice = ScriptedVoice::new(&["specific", "soup", "yes", "yes please", "no"]);
    let end = run_session(
        &mut voice,
        &test_catalog(),
        &default_kitchen(),
        &DialogueSettings::default(),
    )
    .await;

    assert_eq!(end, SessionEnd::UserExit);
    assert_eq!(voice.count("Here's the recipe for Tomato Soup again."), 2);
    assert_eq!(voice.count("tomato, salt"), 3);
    assert_eq!(voice.count(phrases::REPEAT_PROMPT), 3);
    assert_eq!(voice.count(phrases::FINISHED), 1);
    assert_eq!(voice.remaining(), 0);
}

#[tokio::test]
async fn test_repeat_clarifies_unclear_answer() {
    let mut voice = ScriptedVoice::new(&["specific", "soup", "maybe", "", "no"]);
    let end = run_session(
        &mut voice,
        &test_catalog(),
        &default_kitchen(),
        &DialogueSettings::default(),
    )
    .await;

    assert_eq!(end, SessionEnd::UserExit);
    assert_eq!(voice.count(phrases::REPEAT_CLARIFY), 2);
    assert_eq!(voice.count(phrases::REPEAT_PROMPT), 3);
}

#[tokio::test]
async fn test_specific_silent_relisten_and_not_found() {
    let mut voice = ScriptedVoice::new(&["specific", "", "lasagna", "bye"]);
    let end = run_session(
        &mut voice,
        &test_catalog(),
        &default_kitchen(),
        &DialogueSettings::default(),
    )
    .await;

    assert_eq!(end, SessionEnd::UserExit);
    assert_eq!(
        voice.spoken,
        [
            phrases::GREETING,
            phrases::MODE_PROMPT,
            phrases::SPECIFIC_PROMPT,
            phrases::NOT_FOUND,
            phrases::TRY_ANOTHER,
            phrases::FAREWELL,
        ]
    );
    assert_eq!(voice.listens, 4);
}

#[tokio::test]
async fn test_exit_keyword_must_be_whole_utterance() {
    // "bye bye soup" is a lookup, not an exit
    let mut voice = ScriptedVoice::new(&["specific", "bye bye soup", "quit"]);
    let end = run_session(
        &mut voice,
        &test_catalog(),
        &default_kitchen(),
        &DialogueSettings::default(),
    )
    .await;

    assert_eq!(end, SessionEnd::UserExit);
    assert_eq!(voice.count(phrases::NOT_FOUND), 1);
    assert_eq!(voice.count(phrases::FAREWELL), 1);
}

#[tokio::test]
async fn test_tomato_soup_end_to_end() {
    let catalog = Catalog::new(vec![Recipe::new(
        "Tomato Soup",
        ["tomato", "salt"],
        "Boil tomatoes.",
    )]);
    let mut voice = ScriptedVoice::new(&["recommended", "tomato", "no"]);

    let end = run_session(
        &mut voice,
        &catalog,
        &soup_pantry(),
        &DialogueSettings::default(),
    )
    .await;

    assert_eq!(end, SessionEnd::UserExit);
    assert_eq!(voice.count(&phrases::feasible_count(1)), 1);
    assert_eq!(voice.count("Option 1: Tomato Soup"), 1);
    assert_eq!(
        voice.spoken.iter().filter(|s| s.starts_with("Option ")).count(),
        1
    );
    assert_eq!(voice.count("Excellent choice! Let's prepare Tomato Soup"), 1);
    assert_eq!(voice.count(phrases::FINISHED), 1);
}

#[tokio::test]
async fn test_recommended_lists_feasible_in_catalog_order() {
    let mut voice = ScriptedVoice::new(&["recommend", "pizza", "", "exit"]);
    let end = run_session(
        &mut voice,
        &test_catalog(),
        &default_kitchen(),
        &DialogueSettings::default(),
    )
    .await;

    assert_eq!(end, SessionEnd::UserExit);
    assert_eq!(voice.count(&phrases::feasible_count(2)), 1);
    assert_eq!(voice.count("Option 1: Tomato Soup"), 1);
    assert_eq!(voice.count("Option 2: Grilled Cheese Sandwich"), 1);
    assert!(!voice.said_starting_with("Option 3"));
    assert_eq!(voice.count(phrases::CHOICE_CLARIFY), 2);
    assert_eq!(voice.count(phrases::FAREWELL), 1);
}

#[tokio::test]
async fn test_recommended_choice_only_from_feasible() {
    // Carbonara is in the catalog but needs bacon
    let mut voice = ScriptedVoice::new(&["recommended", "carbonara", "cheese", "no"]);
    let end = run_session(
        &mut voice,
        &test_catalog(),
        &default_kitchen(),
        &DialogueSettings::default(),
    )
    .await;

    assert_eq!(end, SessionEnd::UserExit);
    assert_eq!(voice.count(phrases::CHOICE_CLARIFY), 1);
    assert_eq!(
        voice.count("Excellent choice! Let's prepare Grilled Cheese Sandwich"),
        1
    );
}

#[tokio::test]
async fn test_nothing_feasible_returns_to_mode_select() {
    let mut voice = ScriptedVoice::new(&["recommended", "specific", "exit"]);
    let end = run_session(
        &mut voice,
        &test_catalog(),
        &StaticPantry::default(),
        &DialogueSettings::default(),
    )
    .await;

    assert_eq!(end, SessionEnd::UserExit);
    assert_eq!(voice.count(phrases::NOTHING_FEASIBLE), 1);
    assert_eq!(voice.count(phrases::MODE_PROMPT), 2);
    assert_eq!(voice.count(phrases::SPECIFIC_PROMPT), 1);
}

#[tokio::test]
async fn test_malformed_catalog_is_fatal_before_mode_select() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"dishes": [{{"name": "Toast"}}]}}"#).unwrap();

    let catalog = load_catalog(file.path());
    assert!(catalog.is_empty());

    let mut voice = ScriptedVoice::new(&["specific"]);
    let end = run_session(
        &mut voice,
        &catalog,
        &default_kitchen(),
        &DialogueSettings::default(),
    )
    .await;

    assert_eq!(end, SessionEnd::CatalogUnavailable);
    assert_eq!(voice.spoken, [phrases::CATALOG_ERROR]);
    assert_eq!(voice.listens, 0);
}

#[tokio::test]
async fn test_retry_ceiling_ends_session() {
    let settings = DialogueSettings {
        max_retries: Some(3),
        ..DialogueSettings::default()
    };
    let mut voice = ScriptedVoice::new(&["banana", "kiwi", "mango", "specific"]);

    let end = run_session(&mut voice, &test_catalog(), &default_kitchen(), &settings).await;

    assert_eq!(end, SessionEnd::RetriesExhausted);
    assert_eq!(voice.count(phrases::MODE_CLARIFY), 2);
    assert_eq!(voice.count(phrases::GIVE_UP), 1);
    assert_eq!(voice.remaining(), 1);
}

#[tokio::test]
async fn test_zero_retry_ceiling_never_gives_up() {
    let settings = DialogueSettings {
        max_retries: Some(0),
        ..DialogueSettings::default()
    };
    let mut voice = ScriptedVoice::new(&["banana", "kiwi", "specific", "bye"]);

    let end = run_session(&mut voice, &test_catalog(), &default_kitchen(), &settings).await;

    assert_eq!(end, SessionEnd::UserExit);
    assert_eq!(voice.count(phrases::MODE_CLARIFY), 2);
    assert_eq!(voice.count(phrases::GIVE_UP), 0);
    assert_eq!(voice.count(phrases::FAREWELL), 1);
}

#[tokio::test]
async fn test_retry_ceiling_resets_after_progress() {
    let settings = DialogueSettings {
        max_retries: Some(2),
        ..DialogueSettings::default()
    };
    let mut voice = ScriptedVoice::new(&["specific", "soup", "hmm", "yes", "hmm", "yes", "no"]);

    let end = run_session(&mut voice, &test_catalog(), &default_kitchen(), &settings).await;

    assert_eq!(end, SessionEnd::UserExit);
    assert_eq!(voice.count(phrases::GIVE_UP), 0);
    assert_eq!(voice.count("Here's the recipe for Tomato Soup again."), 2);
}

#[tokio::test]
async fn test_closed_input_ends_session() {
    let mut voice = ScriptedVoice::new(&["banana"]);
    let end = run_session(
        &mut voice,
        &test_catalog(),
        &default_kitchen(),
        &DialogueSettings::default(),
    )
    .await;

    assert_eq!(end, SessionEnd::InputClosed);
    assert_eq!(voice.listens, 1);
}

/// Pantry that records how often it is consulted
struct CountingPantry {
    items: HashSet<String>,
    checks: Cell<usize>,
}

impl IngredientSource for CountingPantry {
    fn available(&self) -> HashSet<String> {
        self.checks.set(self.checks.get() + 1);
        self.items.clone()
    }
}

#[tokio::test]
async fn test_pantry_is_consulted_per_recommendation() {
    let pantry = CountingPantry {
        items: HashSet::from(["TOMATO".to_string(), "Salt".to_string()]),
        checks: Cell::new(0),
    };
    let mut voice = ScriptedVoice::new(&["recommended", "bye"]);

    let end = run_session(
        &mut voice,
        &test_catalog(),
        &pantry,
        &DialogueSettings::default(),
    )
    .await;

    assert_eq!(end, SessionEnd::UserExit);
    assert_eq!(pantry.checks.get(), 1);
    assert_eq!(voice.count("Option 1: Tomato Soup"), 1);
}
