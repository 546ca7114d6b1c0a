//! Outbound email rendering
//!
//! Deterministic HTML templates for the two messages the mail sink sends:
//! the lead-facing follow-up and the internal session alert. Templating is
//! plain string assembly; the interesting behavior lives in the pipeline.

use crate::domain::models::LeadRecord;
use crate::utils::calendar::MeetingOption;

/// Minimal plausibility check for a deliverable address.
///
/// Not RFC validation; it only has to keep obviously broken values out of
/// the `to:` field so the internal fallback address is used instead.
pub fn is_plausible_email(address: &str) -> bool {
    let address = address.trim();
    match address.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

/// Render the lead-facing follow-up email body
pub fn render_follow_up(record: &LeadRecord, options: &[MeetingOption]) -> String {
    let mut calendar_section = String::new();
    if !options.is_empty() {
        calendar_section.push_str(
            r#"<div style="background: #f0fdf4; border-radius: 12px; padding: 24px; margin: 24px 0;">
<h3 style="margin: 0 0 16px 0; font-size: 18px;">Schedule Your Demo</h3>
<p style="margin: 0 0 16px 0; font-size: 14px;">I've attached calendar invites for the times we discussed. Choose whichever works best for you:</p>"#,
        );
        for (idx, option) in options.iter().enumerate() {
            calendar_section.push_str(&format!(
                r#"<div title="{}" style="border: 1px solid #d1d5db; border-radius: 8px; padding: 12px 16px; margin: 4px 0; font-size: 13px;"><strong>Option {}:</strong> {}</div>"#,
                option.label,
                idx + 1,
                option.start.format("%A, %b %-d at %-I:%M %p"),
            ));
        }
        calendar_section.push_str(
            r#"<p style="margin: 16px 0 0 0; font-size: 12px;">Calendar invites attached - just open the .ics file to add to your calendar</p>
</div>"#,
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
</head>
<body style="margin: 0; padding: 0; background-color: #f8faf9; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Arial, sans-serif;">
<div style="max-width: 600px; margin: 0 auto; background-color: #ffffff;">
<div style="padding: 32px 24px; text-align: center; border-bottom: 1px solid #e5e7eb;">
<h1 style="margin: 0; font-size: 24px; font-weight: 600;">Thanks for chatting with me!</h1>
<p style="margin: 8px 0 0 0; font-size: 14px; color: #6b7280;">Here's everything we discussed</p>
</div>
<div style="padding: 32px 24px;">
<div style="color: #374151; font-size: 15px; line-height: 1.7;">
{body}
</div>
{calendar}
</div>
<div style="background-color: #f8faf9; padding: 24px; border-top: 1px solid #e5e7eb; font-size: 13px; color: #6b7280;">
Sent by your AI revenue assistant
</div>
</div>
</body>
</html>"#,
        body = record.follow_up_email,
        calendar = calendar_section,
    )
}

/// Context the internal alert reports alongside the lead record itself
pub struct AlertContext<'a> {
    pub conversation_id: &'a str,
    pub transcript_chars: usize,
    pub recording_url: Option<&'a str>,
}

/// Render the internal session-alert email body
pub fn render_internal_alert(record: &LeadRecord, ctx: &AlertContext<'_>) -> String {
    let pain_points = if record.pain_points.is_empty() {
        "<li>No pain points captured (short session)</li>".to_string()
    } else {
        record
            .pain_points
            .iter()
            .map(|p| format!("<li>{}</li>", p))
            .collect::<Vec<_>>()
            .join("")
    };

    let recording_section = match ctx.recording_url {
        Some(url) => format!(
            r#"<a href="{}" style="background-color: #333; color: #fff; padding: 12px 25px; text-decoration: none; border-radius: 6px; font-weight: bold;">View Conversation Record</a>
<p style="margin-top: 10px; font-size: 12px; color: #999;">Link expires in 7 days</p>"#,
            url
        ),
        None => r#"<div style="background-color: #eee; color: #666; padding: 12px 25px; border-radius: 6px; display: inline-block;">Video Processing...</div>
<p style="margin-top: 10px; font-size: 12px; color: #999;">Recording will be available in the dashboard shortly.</p>"#
            .to_string(),
    };

    format!(
        r#"<div style="font-family: sans-serif; padding: 20px; line-height: 1.5; color: #333; background-color: #f9f9f9; border: 1px solid #ddd; border-radius: 8px;">
<div style="border-bottom: 2px solid #10B981; padding-bottom: 10px; margin-bottom: 15px;">
<h2 style="margin: 0;">Session Alert</h2>
<p style="margin: 5px 0 0 0; color: #666; font-size: 14px;">Conversation ID: {conversation_id}</p>
<p style="margin: 5px 0 0 0; color: #666; font-size: 12px;">Transcript Length: {transcript_chars} chars</p>
</div>
<div style="display: grid; grid-template-columns: 1fr 1fr; gap: 20px;">
<div>
<h3 style="margin-bottom: 10px;">Prospect</h3>
<p style="margin: 5px 0;"><strong>Name:</strong> {name}</p>
<p style="margin: 5px 0;"><strong>Role:</strong> {role}</p>
<p style="margin: 5px 0;"><strong>Company:</strong> {company}</p>
<p style="margin: 5px 0;"><strong>Email:</strong> {email}</p>
<p style="margin: 5px 0;"><strong>Location:</strong> {geography}</p>
</div>
<div>
<h3 style="margin-bottom: 10px;">Organization</h3>
<p style="margin: 5px 0;"><strong>Vertical:</strong> {vertical}</p>
<p style="margin: 5px 0;"><strong>Team Size:</strong> {team_size}</p>
<p style="margin: 5px 0;"><strong>Budget:</strong> {budget}</p>
<p style="margin: 5px 0;"><strong>Systems:</strong> {systems}</p>
</div>
</div>
<hr style="border: 0; border-top: 1px solid #ccc; margin: 20px 0;">
<h3>Pain Points</h3>
<ul style="background: #fff; padding: 15px 20px; border-radius: 4px; border: 1px solid #e5e5e5;">{pain_points}</ul>
<h3>Analysis &amp; Next Steps</h3>
<div style="background: #eef2ff; padding: 15px; border-radius: 4px; margin-bottom: 10px; border-left: 4px solid #6366f1;">
<strong>Agent's Action:</strong><br>
{agent_action}
</div>
<div style="background: #fdf2f8; padding: 15px; border-radius: 4px; margin-bottom: 20px; border-left: 4px solid #ec4899;">
<strong>Recommended Team Action:</strong><br>
{team_action}
</div>
<div style="text-align: center; margin-top: 30px;">
{recording}
</div>
</div>"#,
        conversation_id = ctx.conversation_id,
        transcript_chars = ctx.transcript_chars,
        name = record.lead_name,
        role = record.role,
        company = record.company_name,
        email = if record.lead_email.is_empty() {
            "Not provided"
        } else {
            &record.lead_email
        },
        geography = record.geography,
        vertical = record.vertical,
        team_size = record.team_size,
        budget = record.budget_range,
        systems = record.current_systems,
        pain_points = pain_points,
        agent_action = if record.agent_action.is_empty() {
            "Standard follow-up sent."
        } else {
            &record.agent_action
        },
        team_action = if record.team_action.is_empty() {
            "Call to verify lead details."
        } else {
            &record.team_action
        },
        recording = recording_section,
    )
}
