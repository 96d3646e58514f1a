/// Keywords that mark a chat question as agriculture-related. Plain substring
/// match with no word boundaries, so "cropped" matches "crop".
const AGRICULTURE_KEYWORDS: [&str; 34] = [
    "pest",
    "crop",
    "plant",
    "farming",
    "agriculture",
    "soil",
    "fertilizer",
    "seed",
    "harvest",
    "disease",
    "insect",
    "rice",
    "paddy",
    "wheat",
    "corn",
    "vegetable",
    "fruit",
    "irrigation",
    "pesticide",
    "herbicide",
    "fungicide",
    "cultivation",
    "plantation",
    "greenhouse",
    "organic",
    "yield",
    "growth",
    "nutrient",
    "compost",
    "weed",
    "farmer",
    "field",
    "garden",
    "agricultural",
];

/// Returns true iff the text mentions at least one agriculture keyword,
/// case-insensitively. Pure, no I/O; must run before any provider call.
pub fn is_on_topic(text: &str) -> bool {
    let lowered = text.to_lowercase();
    AGRICULTURE_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
}

/// Fixed reply for off-topic chat input, returned with a success status and
/// without invoking the completion provider.
pub const REDIRECT_MESSAGE: &str = "\
## 🌾 Agricultural Assistant Only

I'm specialized in **agricultural topics only**. I can help you with:

- **🐛 Pest identification and control**
- **🌱 Crop diseases and treatments**
- **🚜 Farming techniques and best practices**
- **🌾 Rice, wheat, and other crop cultivation**
- **💧 Irrigation and soil management**
- **🧪 Fertilizers and organic farming**
- **🌿 Plant nutrition and growth**

Please ask me questions related to **agriculture, farming, or crop management**.";

/// Fixed reply when the completion provider fails; the chat endpoint returns
/// this body with a 500 status instead of surfacing the raw error.
pub const APOLOGY_MESSAGE: &str = "\
## ⚠️ Error

**Sorry, I couldn't process your request at the moment.**

Please try asking your agricultural question again, or check:
- Your internet connection
- If the question is related to agriculture/farming

I'm here to help with all your **farming and crop management needs**! 🌱";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_keywords_case_insensitively() {
        assert!(is_on_topic("I have a PEST problem"));
        assert!(is_on_topic("How much Fertilizer for my paddy?"));
    }

    #[test]
    fn matches_substrings_without_word_boundaries() {
        // "cropland" contains "crop"; current behavior, kept deliberately.
        assert!(is_on_topic("I grow cropland"));
        assert!(is_on_topic("the photo was cropped"));
    }

    #[test]
    fn rejects_off_topic_text() {
        assert!(!is_on_topic("what is the weather"));
        assert!(!is_on_topic("What's your favorite movie?"));
        assert!(!is_on_topic(""));
    }

    #[test]
    fn canned_replies_are_markdown() {
        assert!(REDIRECT_MESSAGE.starts_with("## "));
        assert!(APOLOGY_MESSAGE.starts_with("## "));
        assert!(!APOLOGY_MESSAGE.is_empty());
    }
}
