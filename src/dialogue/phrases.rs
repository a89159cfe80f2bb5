//! What the assistant says

pub const CATALOG_ERROR: &str = "Error loading recipes. Please check your recipes file.";
pub const GREETING: &str = "Hello! I'm your kitchen assistant.";

pub const MODE_PROMPT: &str = "Would you like to cook a specific recipe or would you like a recommended recipe? Please say 'specific' or 'recommended'";
pub const MODE_CLARIFY: &str = "I didn't catch that. Please say either 'specific' or 'recommended'";

pub const SPECIFIC_PROMPT: &str = "What recipe would you like to know about?";
pub const NOT_FOUND: &str = "Sorry, I couldn't find a recipe matching your request.";
pub const TRY_ANOTHER: &str = "Please try another recipe.";

pub const CHECKING_PANTRY: &str = "Let me check what ingredients we have available in the kitchen.";
pub const NOTHING_FEASIBLE: &str =
    "I'm sorry, but I couldn't find any recipes that match your available ingredients.";
pub const OPTIONS_LEAD: &str = "Here are the options:";
pub const CHOICE_PROMPT: &str =
    "Which recipe would you like to prepare? Please say the name of the recipe.";
pub const CHOICE_CLARIFY: &str =
    "I'm sorry, I couldn't understand which recipe you want. Please try again, or say 'exit' to quit.";

pub const REPEAT_PROMPT: &str = "Would you like me to repeat the recipe? Say 'yes' or 'no'";
pub const REPEAT_CLARIFY: &str =
    "I didn't understand. Please say 'yes' to repeat or 'no' to finish.";

pub const FAREWELL: &str = "Goodbye! Happy cooking!";
pub const FINISHED: &str = "Have fun cooking and goodbye!";
pub const GIVE_UP: &str = "Let's try again another time. Goodbye!";

#[must_use]
pub fn feasible_count(count: usize) -> String {
    format!("Great! I found {count} recipes you can make with your available ingredients.")
}

#[must_use]
pub fn option(number: usize, name: &str) -> String {
    format!("Option {number}: {name}")
}

/// Lead-ins for reading a recipe aloud
pub struct ReadOut {
    pub intro: String,
    pub ingredients: &'static str,
    pub instructions: &'static str,
}

impl ReadOut {
    /// After a name lookup
    #[must_use]
    pub fn found(name: &str) -> Self {
        Self {
            intro: format!("I found the recipe for {name}."),
            ingredients: "You'll need the following ingredients:",
            instructions: "Here are the instructions:",
        }
    }

    /// After picking from the recommended options
    #[must_use]
    pub fn chosen(name: &str) -> Self {
        Self {
            intro: format!("Excellent choice! Let's prepare {name}"),
            ingredients: "Here are all the ingredients you'll need:",
            instructions: "And here are the instructions:",
        }
    }

    /// When asked to repeat
    #[must_use]
    pub fn again(name: &str) -> Self {
        Self {
            intro: format!("Here's the recipe for {name} again."),
            ingredients: "The ingredients you'll need are:",
            instructions: "And here are the instructions:",
        }
    }
}
