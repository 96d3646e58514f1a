/// Prompt for the pest-explanation flow. With a user query the model is asked
/// to answer it in the context of the predicted pest; without one it is asked
/// for a general overview of the pest.
pub fn explanation_prompt(label: &str, query: Option<&str>) -> String {
    match query {
        Some(query) => format!(
            "The user has a query about '{label}': \"{query}\". \
             Provide an expert explanation considering the pest."
        ),
        None => {
            format!("Explain the symptoms, causes, and solutions for the rice pest: {label}.")
        }
    }
}

/// Consultant-persona prompt for the free-text chat flow. Requests markdown
/// output with headings, bullet points, and bold terms so the front-end can
/// render it directly. User text is interpolated verbatim.
pub fn chat_prompt(text: &str) -> String {
    format!(
        "You are an expert agricultural consultant specializing in crop management, \
         pest control, and farming practices.\n\n\
         Answer this agricultural question in a well-structured markdown format with \
         clear headings, bullet points, and practical advice: {text}\n\n\
         Please format your response with:\n\
         - Clear headings using ## or ###\n\
         - Bullet points for lists\n\
         - **Bold text** for important terms\n\
         - Practical, actionable advice\n\
         - If relevant, include prevention and treatment methods"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explanation_prompt_includes_label_verbatim() {
        let without_query = explanation_prompt("Rice Gall Midge", None);
        let with_query = explanation_prompt("Rice Gall Midge", Some("how do I treat it?"));

        assert!(without_query.contains("Rice Gall Midge"));
        assert!(with_query.contains("Rice Gall Midge"));
        assert!(with_query.contains("how do I treat it?"));
    }

    #[test]
    fn query_and_no_query_prompts_differ() {
        let without_query = explanation_prompt("Brown Planthopper", None);
        let with_query = explanation_prompt("Brown Planthopper", Some("anything"));
        assert_ne!(without_query, with_query);
    }

    #[test]
    fn prompts_are_deterministic() {
        assert_eq!(
            explanation_prompt("Rice Leaf Folder", Some("q")),
            explanation_prompt("Rice Leaf Folder", Some("q"))
        );
        assert_eq!(chat_prompt("brown spots"), chat_prompt("brown spots"));
    }

    #[test]
    fn chat_prompt_embeds_the_question_and_persona() {
        let prompt = chat_prompt("How do I manage paddy weeds?");
        assert!(prompt.contains("How do I manage paddy weeds?"));
        assert!(prompt.contains("agricultural consultant"));
        assert!(prompt.contains("## or ###"));
    }
}
