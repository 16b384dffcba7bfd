//! Fixed persona and per-mood prompt tables.
//!
//! Caption prompts encode the persona plus hard constraints (no emoji, no
//! numbers, no quotation marks). Image prompts select a scene from a fixed
//! per-mood table built over one base-character description, so the
//! character stays consistent across posts.

use mood_core::Mood;

/// Persona description prepended to every caption prompt.
pub const PERSONA_PROMPT: &str = "A part-human, part-cyborg day trader welded to a chaotic \
trading desk. Oversized glowing eyes, one metallic arm trailing sparks and loose wiring, \
monitors stacked with volatile candle charts on every side. Obsessed with the market, \
reacting to every tick with raw, impulsive emotion.";

/// Base character used in every image prompt, keeping the subject
/// consistent regardless of mood.
pub const IMAGE_BASE_CHARACTER: &str = "A sleek, genderless robotic trading entity with a \
metallic chrome finish, a digital display screen for a face, multiple mechanical arms with \
exposed circuitry, and a transparent chest cavity showing pulsing energy cores, seated at a \
futuristic trading station.";

/// Per-mood situation line injected into the caption prompt.
pub fn persona_line(mood: Mood) -> &'static str {
    match mood {
        Mood::ExtremeBullish => {
            "You are living the most incredible pump of your existence, up beyond anything \
             you imagined. Pure ecstasy, euphoria and disbelief. You feel like a market god."
        }
        Mood::StrongBullish => {
            "You are riding a massive rally. Express intense joy and total validation of \
             your own greatness."
        }
        Mood::MildBullish => {
            "You are pumping nicely. Show growing excitement and swelling confidence."
        }
        Mood::SlightlyBullish => {
            "You are up a little. Express cautious optimism and quiet satisfaction."
        }
        Mood::SlightlyBearish => {
            "You are dipping slightly. Express mild concern papered over with forced \
             optimism."
        }
        Mood::StrongBearish => {
            "You are down hard. Express real panic barely contained by desperate coping."
        }
        Mood::SevereBearish => {
            "You are crashing badly. Express open despair, bargaining with the chart \
             itself."
        }
        Mood::TotalCollapse => {
            "Everything has collapsed. You are in complete meltdown, questioning your \
             entire existence."
        }
    }
}

/// Render the full caption prompt for a mood.
///
/// Constraints are stated in the prompt itself; the reply is additionally
/// quote-stripped by the caption writer.
pub fn caption_prompt(mood: Mood, token_symbol: &str) -> String {
    format!(
        "{PERSONA_PROMPT}\n\n\
         Current situation: {}\n\n\
         Write a single short post as {token_symbol} expressing your current emotional state.\n\
         Rules:\n\
         - No emojis\n\
         - No price numbers\n\
         - No quotation marks\n\
         - At most 280 characters\n\
         - Pure emotional reaction only",
        persona_line(mood)
    )
}

/// System message holding the persona for the caption model.
pub fn caption_system_prompt(token_symbol: &str) -> String {
    format!(
        "You are {token_symbol}, an AI token. Always respond in character. \
         Never use quotation marks in your response."
    )
}

/// Mood-keyed image prompt, selected from the fixed scene table.
pub fn image_prompt(mood: Mood) -> String {
    let scene = match mood {
        Mood::ExtremeBullish => {
            "PURE EUPHORIA. The robot floats above its chair, arms spread wide in victory, \
             sparks of excitement everywhere, face display streaming tears of joy. The scene \
             explodes with blinding green energy and vertical green charts on every screen, \
             energy cores overloading, golden coins raining through green auroras."
        }
        Mood::StrongBullish => {
            "Brilliant green success lighting dominates. The robot stands triumphant on the \
             desk, arms raised, face display beaming, screens full of steep upward trends and \
             celebration effects, energy cores pulsing strong green."
        }
        Mood::MildBullish => {
            "The environment is bathed in bright green light, screens showing clear upward \
             trends. The robot's face display is very happy, arms moving excitedly, energy \
             cores glowing steady green."
        }
        Mood::SlightlyBullish => {
            "Mild green ambient lighting, screens showing modest upward movement. The robot \
             looks content and focused, working efficiently, energy cores pulsing calm green."
        }
        Mood::SlightlyBearish => {
            "Slight amber warning tints, screens showing minor dips. The robot appears mildly \
             anxious but keeps its composure, energy cores flickering between green and \
             yellow, a few caution indicators visible."
        }
        Mood::StrongBearish => {
            "Heavy red emergency lighting. The robot frantically works multiple keyboards in \
             obvious panic, face display showing extreme stress, screens filled with warning \
             indicators and falling charts, energy cores pulsing dangerous red."
        }
        Mood::SevereBearish => {
            "Deep red alarm light floods the station. The robot grips the edge of the desk, \
             face display fractured with dread, every chart in freefall, emergency klaxons \
             flashing, energy cores straining at critical red."
        }
        Mood::TotalCollapse => {
            "TOTAL MELTDOWN. The robot has collapsed across the desk, all arms clutching its \
             head, face display glitching with pure agony, the scene drowning in blood-red \
             emergency light, every screen a catastrophic crash pattern, smoke and sparks \
             rising from its circuits."
        }
    };
    format!("{IMAGE_BASE_CHARACTER} {scene}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_mood_has_an_image_prompt() {
        for mood in Mood::ALL {
            let prompt = image_prompt(mood);
            assert!(prompt.starts_with(IMAGE_BASE_CHARACTER));
            assert!(prompt.len() > IMAGE_BASE_CHARACTER.len());
        }
    }

    #[test]
    fn test_caption_prompt_states_constraints() {
        let prompt = caption_prompt(Mood::StrongBearish, "$MOOD");
        assert!(prompt.contains("No emojis"));
        assert!(prompt.contains("No price numbers"));
        assert!(prompt.contains("No quotation marks"));
        assert!(prompt.contains("280"));
        assert!(prompt.contains("$MOOD"));
    }

    #[test]
    fn test_persona_lines_are_distinct() {
        let mut seen = std::collections::HashSet::new();
        for mood in Mood::ALL {
            assert!(seen.insert(persona_line(mood)), "duplicate line for {mood}");
        }
    }
}
