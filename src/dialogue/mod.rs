//! Dialogue engine
//!
//! One session is a loop over mode selection. Each mode runs its own flow
//! until the user exits, or hands control back to mode selection:
//!
//! ```text
//! ModeSelect ──► SpecificFlow ────┐
//!     ▲    └──► RecommendedFlow ──┤──► RepeatLoop ──► SessionEnd
//!     └──────── (nothing feasible)┘
//! ```
//!
//! Every turn is a single speak/listen exchange over [`VoiceIo`]. Empty
//! utterances mean nothing was understood and only ever cause a re-prompt.

mod intent;
pub mod phrases;

use crate::recipe::{Catalog, IngredientSource, Recipe, find_by_name, find_feasible};
use crate::voice::VoiceIo;

pub use intent::{Intent, Keywords, confirmation};
use phrases::ReadOut;

/// Why a session stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user said goodbye or declined a repeat
    UserExit,
    /// No recipes were loaded, the session never started
    CatalogUnavailable,
    /// The configured retry ceiling was reached
    RetriesExhausted,
    /// The voice input can no longer produce utterances
    InputClosed,
}

/// Session tuning
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogueSettings {
    /// Keyword sets for classification
    pub keywords: Keywords,

    /// Give up on the Nth consecutive unproductive turn at any prompt.
    /// `None` or `Some(0)` keeps re-prompting forever
    pub max_retries: Option<usize>,
}

/// Top-level mode picked at mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Specific,
    Recommended,
}

/// `Ok` returns to mode selection, `Err` ends the session
type Flow = Result<(), SessionEnd>;

/// Counts consecutive unproductive turns at one prompt
struct Retries {
    limit: Option<usize>,
    misses: usize,
}

impl Retries {
    fn new(limit: Option<usize>) -> Self {
        Self {
            limit: limit.filter(|&n| n > 0),
            misses: 0,
        }
    }

    /// Record a miss; true once the limit is reached
    fn miss(&mut self) -> bool {
        self.misses += 1;
        self.limit.is_some_and(|limit| self.misses >= limit)
    }

    const fn reset(&mut self) {
        self.misses = 0;
    }
}

/// A single conversation with the assistant
pub struct Session<'a, V: VoiceIo + ?Sized, P: IngredientSource + ?Sized> {
    voice: &'a mut V,
    catalog: &'a Catalog,
    pantry: &'a P,
    settings: &'a DialogueSettings,
}

impl<'a, V: VoiceIo + ?Sized, P: IngredientSource + ?Sized> Session<'a, V, P> {
    /// Create a session over the given collaborators
    pub const fn new(
        voice: &'a mut V,
        catalog: &'a Catalog,
        pantry: &'a P,
        settings: &'a DialogueSettings,
    ) -> Self {
        Self {
            voice,
            catalog,
            pantry,
            settings,
        }
    }

    /// Run the session to completion
    pub async fn run(mut self) -> SessionEnd {
        if self.catalog.is_empty() {
            tracing::error!("no recipes loaded, not starting session");
            self.voice.speak(phrases::CATALOG_ERROR).await;
            return SessionEnd::CatalogUnavailable;
        }

        tracing::info!(recipes = self.catalog.len(), "session started");
        self.voice.speak(phrases::GREETING).await;

        let end = loop {
            let flow = match self.select_mode().await {
                Ok(Mode::Specific) => self.specific_flow().await,
                Ok(Mode::Recommended) => self.recommended_flow().await,
                Err(end) => Err(end),
            };

            if let Err(end) = flow {
                break end;
            }
        };

        tracing::info!(?end, "session ended");
        end
    }

    /// Ask for a mode until one is recognized
    async fn select_mode(&mut self) -> Result<Mode, SessionEnd> {
        let mut retries = self.retries();

        loop {
            self.voice.speak(phrases::MODE_PROMPT).await;
            let utterance = self.hear().await?;

            match self.settings.keywords.mode(&utterance) {
                Intent::Specific => return Ok(Mode::Specific),
                Intent::Recommended => return Ok(Mode::Recommended),
                _ => {
                    tracing::debug!(utterance, "mode not recognized");
                    self.missed(&mut retries, &[phrases::MODE_CLARIFY]).await?;
                }
            }
        }
    }

    /// Look recipes up by name until the user exits
    async fn specific_flow(&mut self) -> Flow {
        tracing::debug!("entering specific flow");
        self.voice.speak(phrases::SPECIFIC_PROMPT).await;
        let mut retries = self.retries();
        let catalog = self.catalog;

        loop {
            let utterance = self.hear().await?;

            match self.settings.keywords.reply(&utterance) {
                Some(Intent::Exit) => return self.farewell().await,
                Some(_) => {
                    // Heard nothing, listen again without prompting
                    self.missed(&mut retries, &[]).await?;
                    continue;
                }
                None => {}
            }

            match find_by_name(&utterance, catalog) {
                Some(recipe) => {
                    retries.reset();
                    self.read_out(&ReadOut::found(&recipe.name), recipe).await;
                    return Err(self.repeat_loop(recipe).await);
                }
                None => {
                    tracing::debug!(query = utterance, "no recipe matched");
                    self.missed(&mut retries, &[phrases::NOT_FOUND, phrases::TRY_ANOTHER])
                        .await?;
                }
            }
        }
    }

    /// Offer the recipes that can be made with what's on hand
    async fn recommended_flow(&mut self) -> Flow {
        tracing::debug!("entering recommended flow");
        self.voice.speak(phrases::CHECKING_PANTRY).await;

        let available = self.pantry.available();
        let feasible = find_feasible(&available, self.catalog);

        if feasible.is_empty() {
            self.voice.speak(phrases::NOTHING_FEASIBLE).await;
            return Ok(());
        }

        self.voice.speak(&phrases::feasible_count(feasible.len())).await;
        self.voice.speak(phrases::OPTIONS_LEAD).await;
        for (i, recipe) in feasible.iter().enumerate() {
            self.voice.speak(&phrases::option(i + 1, &recipe.name)).await;
        }
        self.voice.speak(phrases::CHOICE_PROMPT).await;

        let mut retries = self.retries();
        loop {
            let utterance = self.hear().await?;

            if self.settings.keywords.reply(&utterance) == Some(Intent::Exit) {
                return self.farewell().await;
            }

            if let Some(recipe) = find_by_name(&utterance, feasible.iter().copied()) {
                retries.reset();
                self.read_out(&ReadOut::chosen(&recipe.name), recipe).await;
                return Err(self.repeat_loop(recipe).await);
            }

            self.missed(&mut retries, &[phrases::CHOICE_CLARIFY]).await?;
        }
    }

    /// Offer to repeat the recipe until the user declines
    ///
    /// Only ever returns by ending the session
    async fn repeat_loop(&mut self, recipe: &Recipe) -> SessionEnd {
        let mut retries = self.retries();

        loop {
            self.voice.speak(phrases::REPEAT_PROMPT).await;
            let utterance = match self.hear().await {
                Ok(utterance) => utterance,
                Err(end) => return end,
            };

            match confirmation(&utterance) {
                Intent::Affirm => {
                    retries.reset();
                    self.read_out(&ReadOut::again(&recipe.name), recipe).await;
                }
                Intent::Deny => {
                    self.voice.speak(phrases::FINISHED).await;
                    return SessionEnd::UserExit;
                }
                _ => {
                    if let Err(end) = self.missed(&mut retries, &[phrases::REPEAT_CLARIFY]).await {
                        return end;
                    }
                }
            }
        }
    }

    async fn read_out(&mut self, lead: &ReadOut, recipe: &Recipe) {
        tracing::debug!(recipe = %recipe.name, "reading recipe");
        self.voice.speak(&lead.intro).await;
        self.voice.speak(lead.ingredients).await;
        self.voice.speak(&recipe.ingredient_list()).await;
        self.voice.speak(lead.instructions).await;
        self.voice.speak(&recipe.instructions).await;
    }

    async fn farewell(&mut self) -> Flow {
        self.voice.speak(phrases::FAREWELL).await;
        Err(SessionEnd::UserExit)
    }

    /// Next utterance, unless the input has gone away
    async fn hear(&mut self) -> Result<String, SessionEnd> {
        if !self.voice.is_open() {
            return Err(SessionEnd::InputClosed);
        }
        Ok(self.voice.listen().await)
    }

    /// Count an unproductive turn, then either clarify or give up
    async fn missed(&mut self, retries: &mut Retries, clarification: &[&str]) -> Flow {
        if retries.miss() {
            tracing::warn!(misses = retries.misses, "retry limit reached");
            self.voice.speak(phrases::GIVE_UP).await;
            return Err(SessionEnd::RetriesExhausted);
        }

        for line in clarification {
            self.voice.speak(line).await;
        }
        Ok(())
    }

    fn retries(&self) -> Retries {
        Retries::new(self.settings.max_retries)
    }
}
