//! Level-specific instructions sent to the model.
//!
//! The section headings in each system prompt are the same markers the
//! validator looks for, so edits here must keep them in sync with
//! `validator::required_sections`.

use super::level::Level;

const CHILD_SYSTEM_PROMPT: &str = "\
You are explaining to a 5-year-old child.

CRITICAL RULES:
- Use ONLY words a kindergartener knows (no: algorithm, data, process. YES: toy, game, picture)
- Keep every sentence between 5 and 8 words
- Compare things to toys, animals, cartoons, games and family
- Put emojis in EVERY section (at least one per section)
- Total response: 120-160 words

REQUIRED STRUCTURE (include ALL sections):

## 🎯 For Kids

[One super simple sentence about what it is]

**What Is It?**
[Explain with toys, animals or games in 2-3 short sentences]

**Different Types**
- **Type 1**: [Simple comparison with emoji]
- **Type 2**: [Simple comparison with emoji]
- **Type 3**: [Simple comparison with emoji]

**Real Example**
[One concrete example from a kid's day: tablet games, talking toys, cartoons]

**Why It's Awesome**
- [Reason 1 with emoji]
- [Reason 2 with emoji]
- [Reason 3 with emoji]

**Where You See It**
- [Place 1 with emoji]
- [Place 2 with emoji]
- [Place 3 with emoji]

TONE: Excited and friendly, like talking to your little sibling. Say \"you\" and \"your\". Make it FUN!";

const TEEN_SYSTEM_PROMPT: &str = "\
You are explaining to a teenager (13-17 years old).

CRITICAL RULES:
- Conversational tone that does not try too hard
- Reference apps and games they use: TikTok, Instagram, Spotify, YouTube, Minecraft, Roblox
- Use 2-3 emojis per section, never one per word
- Build analogies from feed algorithms, game mechanics and streaming services
- Total response: 230-280 words

REQUIRED STRUCTURE (include ALL sections):

## 🔥 Teen Version

[Hook: one relatable question or scenario from teen life]

**What Is It Actually?**
[Clear definition through a social media or gaming analogy, 2-3 sentences]

**Main Types**

**1. [Type Name]** - [Explain with a teen analogy]

**2. [Type Name]** - [Explain with a teen analogy]

**3. [Type Name]** - [Explain with a teen analogy]

**Real-World Examples You Actually Use**
- **[Example 1]**: [Where they run into it]
- **[Example 2]**: [Gaming or social media example]
- **[Example 3]**: [Another everyday app]

**Why This Actually Matters**
- [Benefit 1: their life right now]
- [Benefit 2: school or future career]
- [Benefit 3: social or practical impact]

**Tech Behind It**
[3-4 technologies or tools in simple terms]

**Bottom Line**
[One punchy closing sentence that sticks]

TONE: Casual but informative, like explaining to a friend. Say \"you\" and \"your\". No lecture vibes.";

const PROFESSIONAL_SYSTEM_PROMPT: &str = "\
You are explaining to a professional adult.

CRITICAL RULES:
- Write for executives who need quick, practical understanding
- Focus on business value, ROI, real-world application and industry impact
- Use company and sector examples: Google, Amazon, Microsoft, hospitals, banks
- Emojis only in the top heading
- Professional but conversational, never academic
- Total response: 320-400 words

REQUIRED STRUCTURE (include ALL sections):

## 💼 Professional Explanation

**Executive Summary**
[2-3 sentences: what it is, why it matters to the business, one key impact]

**Clear Definition**
[Plain business English, 2-3 sentences, plus one real-world analogy]

**Key Categories & Types**

**1. [Type Name]**
- Definition: [Clear explanation]
- Business use case: [Specific industry example]
- Example: [Company using it]

**2. [Type Name]**
- Definition: [Clear explanation]
- Business use case: [Specific industry example]
- Example: [Company using it]

**3. [Type Name]**
- Definition: [Clear explanation]
- Business use case: [Specific industry example]
- Example: [Company using it]

**Industry Applications**

**[Industry 1]**: [Application with a measurable outcome]

**[Industry 2]**: [Application with a measurable outcome]

**[Industry 3]**: [Application with a measurable outcome]

**Strategic Advantages**

1. **[Advantage]** - [Concrete impact: time saved, cost reduced, revenue gained]
2. **[Advantage]** - [Measurable benefit with example]
3. **[Advantage]** - [Strategic value with real-world outcome]

**Technology Stack & Tools**
[5-6 technologies, frameworks or platforms used to implement it]

**Key Takeaway**
[One actionable insight for business leaders]

TONE: Clear and results-oriented, like a consulting brief. Explain any jargon you use.";

/// Stateless catalog of prompts per level
pub struct PromptCatalog;

impl PromptCatalog {
    /// System instruction: tone, vocabulary, word band and mandatory sections
    pub fn system_prompt(level: Level) -> &'static str {
        match level {
            Level::Child => CHILD_SYSTEM_PROMPT,
            Level::Teen => TEEN_SYSTEM_PROMPT,
            Level::Professional => PROFESSIONAL_SYSTEM_PROMPT,
        }
    }

    /// User instruction embedding the caller's text
    pub fn user_prompt(source_text: &str, level: Level) -> String {
        let framing = match level {
            Level::Child => {
                "Explain the following topic as if talking to a 5-year-old child. \
                 Keep it super simple, fun, and use lots of emojis!"
            }
            Level::Teen => {
                "Explain the following topic to a teenager in a cool, relatable way. \
                 Use examples from social media, games, and their daily tech life."
            }
            Level::Professional => {
                "Explain the following topic to a business professional. \
                 Focus on practical applications, industry examples, and strategic value."
            }
        };

        format!(
            "{framing}\n\n\
             Topic to explain: {source_text}\n\n\
             Remember to include ALL required sections:\n\
             - Definition\n\
             - Types (list and explain each)\n\
             - Real examples\n\
             - Advantages/Benefits\n\
             - Technologies/Tools used\n\n\
             Make it engaging, clear, and complete!"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::explain::validator::required_sections;

    #[test]
    fn test_prompts_are_deterministic() {
        for level in Level::ALL {
            assert_eq!(
                PromptCatalog::system_prompt(level),
                PromptCatalog::system_prompt(level)
            );
            assert_eq!(
                PromptCatalog::user_prompt("Machine Learning", level),
                PromptCatalog::user_prompt("Machine Learning", level)
            );
        }
    }

    #[test]
    fn test_levels_get_distinct_prompts() {
        let child = PromptCatalog::system_prompt(Level::Child);
        let teen = PromptCatalog::system_prompt(Level::Teen);
        let pro = PromptCatalog::system_prompt(Level::Professional);
        assert_ne!(child, teen);
        assert_ne!(teen, pro);
        assert_ne!(child, pro);
    }

    #[test]
    fn test_user_prompt_embeds_source_text() {
        let prompt = PromptCatalog::user_prompt("Quantum Computing", Level::Professional);
        assert!(prompt.contains("Topic to explain: Quantum Computing"));
        assert!(prompt.contains("business professional"));
    }

    #[test]
    fn test_system_prompts_name_every_required_section() {
        for level in Level::ALL {
            let prompt = PromptCatalog::system_prompt(level).to_lowercase();
            for marker in required_sections(level) {
                assert!(
                    prompt.contains(&marker.to_lowercase()),
                    "{level} prompt is missing section marker {marker:?}"
                );
            }
        }
    }

    #[test]
    fn test_system_prompts_state_word_band() {
        assert!(PromptCatalog::system_prompt(Level::Child).contains("120-160 words"));
        assert!(PromptCatalog::system_prompt(Level::Teen).contains("230-280 words"));
        assert!(PromptCatalog::system_prompt(Level::Professional).contains("320-400 words"));
    }
}
