//! Prompt templates for lead analysis
//!
//! Provides the default prompt template used to derive a structured lead
//! record from a conversation transcript.

/// Default prompt templates
pub struct PromptTemplates;

impl PromptTemplates {
    /// Get the lead-analysis prompt.
    ///
    /// The `{transcript}` placeholder is substituted with the normalized
    /// conversation text. The collaborator is instructed to answer with a
    /// single JSON object matching `LeadRecord`'s field names.
    pub fn lead_analysis() -> &'static str {
        r#"You are a revenue analyst reviewing the transcript of a conversation between a prospective customer and an AI sales agent. Extract everything a sales team needs to qualify and follow up with this lead.

Conversation Transcript:
{transcript}

Respond with a single JSON object and nothing else. Use exactly these keys:
- "lead_name": the prospect's name
- "role": their job title or role
- "company_name": their company
- "lead_email": email address if stated, otherwise ""
- "lead_phone": phone number if stated, otherwise ""
- "budget_range": stated or implied budget
- "timeline": stated or implied purchase timeline
- "pain_points": array of specific problems they described, in the order raised
- "buying_committee": array of other people or roles involved in the decision
- "vertical": their industry
- "team_size": size of their team or company
- "geography": where they operate
- "current_systems": tools or systems they use today
- "sales_plan": a short narrative plan for winning this deal
- "agent_action": what the agent already did or promised during the call
- "team_action": the single most valuable next step for the human sales team
- "follow_up_email": a warm, concise follow-up email body as HTML paragraphs, recapping the conversation and the promised next step
- "proposed_meeting_times": array of meeting times proposed during the call, as natural-language strings (e.g. "Tuesday at 2pm"), empty if none

Use "Unknown" for any qualitative field the transcript does not reveal. Do not invent contact details."#
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_analysis_prompt_has_placeholder() {
        let prompt = PromptTemplates::lead_analysis();
        assert!(prompt.contains("{transcript}"));
        assert!(prompt.contains("\"lead_name\""));
        assert!(prompt.contains("\"proposed_meeting_times\""));
    }
}
