//! OpenAPI specification and Swagger UI configuration.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Outreach Express API",
        version = "0.1.0",
        description = "Multi-channel B2B outreach orchestration.\n\nTracks contacts through engagement campaigns, records and locks per-contact outcomes, and chains follow-up campaigns.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Operations", description = "Health, readiness, and liveness probes"),
        (name = "Templates", description = "Reusable message templates, scoped per user"),
        (name = "Contacts", description = "Contact directory with append-only activity history"),
        (name = "Drafts", description = "Batch draft generation keyed by engagement intent"),
        (name = "Campaigns", description = "Campaign ledger and outcome tracking"),
        (name = "Follow-ups", description = "Follow-up drafting and chained campaign sends"),
    ),
    paths(
        // Operations
        crate::rest::health_check,
        crate::rest::readiness,
        crate::rest::liveness,
        // Templates
        crate::template_rest::save_template,
        crate::template_rest::list_templates,
        crate::template_rest::get_template,
        crate::template_rest::delete_template,
        // Contacts
        crate::contact_rest::create_contact,
        crate::contact_rest::list_contacts,
        crate::contact_rest::get_contact,
        crate::contact_rest::contact_activities,
        crate::contact_rest::add_note,
        crate::contact_rest::edit_note,
        crate::contact_rest::delete_note,
        crate::contact_rest::enrich_contact,
        // Drafts
        crate::draft_rest::generate_batch,
        // Campaigns
        crate::campaign_rest::create_campaign,
        crate::campaign_rest::list_campaigns,
        crate::campaign_rest::get_campaign,
        crate::campaign_rest::set_outcome,
        // Follow-ups
        crate::followup_rest::draft_follow_up,
        crate::followup_rest::send_follow_up,
    ),
    components(schemas(
        // Core domain types
        outreach_core::types::Channel,
        outreach_core::types::EngagementIntent,
        outreach_core::types::Outcome,
        outreach_core::types::SendStatus,
        outreach_core::types::Campaign,
        outreach_core::types::ContactSendRecord,
        outreach_core::types::Template,
        outreach_core::types::Contact,
        outreach_core::types::Note,
        outreach_core::types::Activity,
        outreach_core::types::ActivityType,
        // Engine request/response types
        outreach_engine::templates::TemplateDraft,
        outreach_engine::contacts::NewContact,
        outreach_engine::ledger::MessageContent,
        outreach_engine::followup::SendFollowUpRequest,
        outreach_engine::drafts::ContactDraft,
        // REST types
        crate::rest::HealthResponse,
        crate::error::ErrorResponse,
        crate::contact_rest::NoteRequest,
        crate::contact_rest::EnrichRequest,
        crate::draft_rest::BatchDraftRequest,
        crate::campaign_rest::CreateCampaignRequest,
        crate::campaign_rest::SetOutcomeRequest,
        crate::followup_rest::DraftFollowUpRequest,
        crate::followup_rest::DraftFollowUpResponse,
        crate::followup_rest::SendFollowUpResponse,
    ))
)]
pub struct ApiDoc;
