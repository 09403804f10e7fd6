//! Team dashboard handlers

use tracing::{debug, info};

use crate::handlers::render;
use crate::models::{AddMemberRequest, CompetitionItem, CreateTeamRequest, TeamMember};
use crate::services::ServiceFactory;
use crate::state::{
    available_members, can_manage_members, existing_participants, find_team_for_user, EnrollmentSlots,
    Viewer,
};
use crate::utils::errors::{EventHubError, Result};

use super::TeamsCommand;

pub async fn handle_teams(services: &ServiceFactory, action: TeamsCommand) -> Result<()> {
    match action {
        TeamsCommand::List { event_id } => {
            let teams = services.teams.list_for_event(&event_id).await?;
            if teams.is_empty() {
                println!("No teams yet.");
            }
            for team in &teams {
                print!("{}", render::team_block(team));
            }
        }
        TeamsCommand::Create { event_id, name, manager_email } => {
            let request = CreateTeamRequest { event_id, name, manager_email };
            let team = services.teams.create(&request).await?;
            println!("Created team {} ({}).", team.name, team.id);
        }
        TeamsCommand::AddMember { team_id, email, role, category } => {
            services.auth.require_user()?;
            let request = AddMemberRequest { email, role, category_id: category };
            let team = services.teams.add_member(&team_id, &request).await?;
            println!("Added {} to {} as {}.", request.email, team.name, role.as_str());
        }
        TeamsCommand::Enroll { event_id, item_id, participants } => {
            handle_enroll(services, &event_id, &item_id, &participants).await?
        }
    }
    Ok(())
}

fn member_label(member: &TeamMember) -> String {
    format!("{} ({})", member.user.display_name(), member.user_id())
}

async fn handle_enroll(
    services: &ServiceFactory,
    event_id: &str,
    item_id: &str,
    participants: &[String],
) -> Result<()> {
    let user = services.auth.require_user()?;
    let event = services.events.get(event_id).await?;
    if !Viewer::new(&event, Some(&user), None).can_view_team_dashboard() {
        return Err(EventHubError::Validation(
            "Teams are not enabled for this event.".to_string(),
        ));
    }

    let (teams, items, event_entries, item_entries) = futures::try_join!(
        services.teams.list_for_event(event_id),
        services.competition.items(event_id),
        services.competition.entries_for_event(event_id),
        services.competition.entries_for_item(item_id),
    )?;

    let team = find_team_for_user(&teams, &user.id).ok_or_else(|| {
        EventHubError::Validation("You are not a member of any team for this event.".to_string())
    })?;
    if !can_manage_members(team, &user.id) {
        return Err(EventHubError::Validation(
            "Only team managers can enroll participants.".to_string(),
        ));
    }
    let item: &CompetitionItem = items.iter().find(|i| i.id == item_id).ok_or_else(|| {
        EventHubError::Validation("Competition item not found.".to_string())
    })?;

    let available = available_members(
        team,
        item,
        &event_entries,
        event.max_individual_items_per_participant(),
    );
    let mut slots = EnrollmentSlots::prefilled(item, &existing_participants(&item_entries, &team.id));
    slots.reconcile(&available);
    debug!(team_id = %team.id, item_id = %item.id, available = available.len(), "Enrollment form loaded");

    if participants.is_empty() {
        println!(
            "{} for {} ({}-{} participants)",
            item.name,
            team.name,
            item.min_participants(),
            item.max_participants()
        );
        for index in 0..slots.len() {
            let current = slots.get(index).unwrap_or("-");
            let options: Vec<String> = slots
                .options(index, &available)
                .into_iter()
                .map(member_label)
                .collect();
            println!("  slot {}: {}", index + 1, current);
            if !options.is_empty() {
                println!("    options: {}", options.join(", "));
            }
        }
        return Ok(());
    }

    if participants.len() > slots.len() {
        return Err(EventHubError::Validation(format!(
            "This item allows a maximum of {} participants.",
            item.max_participants()
        )));
    }
    slots.clear();
    for (index, participant) in participants.iter().enumerate() {
        slots.set(index, Some(participant.trim().to_string()))?;
    }

    let before = slots.selected().len();
    slots.reconcile(&available);
    if slots.selected().len() != before {
        return Err(EventHubError::Validation(
            "Some selected participants are not eligible for this item.".to_string(),
        ));
    }

    let request = slots.sync_request(event_id, item, team)?;
    services.competition.sync_entries(&request).await?;
    info!(team_id = %team.id, item_id = %item.id, count = request.participants.len(), "Entries synced");
    println!("Saved {} participant(s) for {}.", request.participants.len(), item.name);
    Ok(())
}
