//! Organizer competition setup, scoring and leaderboards

use tracing::info;

use crate::handlers::render;
use crate::models::{
    CompetitionItem, CreateCategoryRequest, CreateItemRequest, Event, GradePoints, PlacePoints,
};
use crate::services::ServiceFactory;
use crate::state::{
    build_result, dedupe_entries, entry_label, grade_options, place_options, LeaderboardVisibility,
    Viewer,
};
use crate::utils::errors::{EventHubError, Result};

use super::{CompetitionCommand, ResultsCommand};

async fn require_scoring_access(services: &ServiceFactory, event_id: &str) -> Result<Event> {
    let user = services.auth.require_user()?;
    let event = services.events.get(event_id).await?;
    if !Viewer::new(&event, Some(&user), None).can_view_scoring_dashboard() {
        return Err(EventHubError::Validation(
            "Scoring is only available to the organizer of a competition with scoring enabled."
                .to_string(),
        ));
    }
    Ok(event)
}

async fn find_item(services: &ServiceFactory, event_id: &str, item_id: &str) -> Result<CompetitionItem> {
    services
        .competition
        .items(event_id)
        .await?
        .into_iter()
        .find(|item| item.id == item_id)
        .ok_or_else(|| EventHubError::Validation("Competition item not found.".to_string()))
}

pub async fn handle_competition(services: &ServiceFactory, action: CompetitionCommand) -> Result<()> {
    match action {
        CompetitionCommand::Categories { event_id } => {
            let categories = services.competition.categories(&event_id).await?;
            if categories.is_empty() {
                println!("No categories yet.");
            }
            for category in categories {
                println!(
                    "{:<26} {:<24} {}",
                    category.id,
                    category.name,
                    category.description.unwrap_or_default()
                );
            }
        }
        CompetitionCommand::AddCategory { event_id, name, description } => {
            let request = CreateCategoryRequest { event_id, name, description };
            let category = services.competition.create_category(&request).await?;
            println!("Created category {} ({}).", category.name, category.id);
        }
        CompetitionCommand::RemoveCategory { category_id } => {
            services.competition.delete_category(&category_id).await?;
            println!("Category deleted.");
        }
        CompetitionCommand::Items { event_id } => {
            let items = services.competition.items(&event_id).await?;
            if items.is_empty() {
                println!("No competition items yet.");
            }
            for item in items {
                println!(
                    "{:<26} {:<28} {:<10} max {}",
                    item.id,
                    item.name,
                    item.item_type.as_str(),
                    item.max_participants()
                );
            }
        }
        CompetitionCommand::AddItem { event_id, name, item_type, categories, max_participants } => {
            let request = CreateItemRequest {
                event_id,
                name,
                item_type,
                allowed_categories: categories,
                max_participants_per_team: max_participants,
                place_points: PlacePoints::default(),
                grade_points: GradePoints::default(),
            };
            let item = services.competition.create_item(&request).await?;
            println!("Created item {} ({}).", item.name, item.id);
        }
        CompetitionCommand::RemoveItem { item_id } => {
            services.competition.delete_item(&item_id).await?;
            println!("Item deleted.");
        }
    }
    Ok(())
}

pub async fn handle_results(services: &ServiceFactory, action: ResultsCommand) -> Result<()> {
    match action {
        ResultsCommand::Entries { event_id, item_id } => {
            require_scoring_access(services, &event_id).await?;
            let (item, entries) = futures::try_join!(
                find_item(services, &event_id, &item_id),
                services.competition.entries_for_item(&item_id),
            )?;
            let entries = dedupe_entries(entries);

            println!("{} ({})", item.name, item.item_type.as_str());
            if entries.is_empty() {
                println!("  No entries yet.");
            }
            for entry in &entries {
                println!("  {:<26} {}", entry.id, entry_label(entry, &item));
            }
            let places: Vec<String> =
                place_options(&item).iter().map(|o| format!("{}={}pt", o.value, o.points)).collect();
            let grades: Vec<String> =
                grade_options(&item).iter().map(|o| format!("{}={}pt", o.value, o.points)).collect();
            println!("Places: {}", places.join(", "));
            println!("Grades: {}", grades.join(", "));
        }
        ResultsCommand::Submit { event_id, item_id, entry_id, participant, place, grade } => {
            require_scoring_access(services, &event_id).await?;
            if place.is_none() && grade.is_none() {
                return Err(EventHubError::Validation(
                    "Please choose a place or a grade.".to_string(),
                ));
            }
            let (item, entries) = futures::try_join!(
                find_item(services, &event_id, &item_id),
                services.competition.entries_for_item(&item_id),
            )?;
            let entries = dedupe_entries(entries);
            let entry = entries.iter().find(|e| e.id == entry_id).ok_or_else(|| {
                EventHubError::Validation("Selected team entry not found for this item.".to_string())
            })?;

            let request = build_result(
                &event_id,
                &item,
                entry,
                participant.as_deref(),
                place,
                grade.as_deref(),
            )?;
            services.results.submit(&request).await?;
            info!(item_id = %item.id, entry_id = %entry.id, "Result recorded");
            println!("Result saved for {}.", entry_label(entry, &item));
        }
        ResultsCommand::Leaderboard { event_id } => {
            let user = services.auth.current_user();
            let event = services.events.get(&event_id).await?;
            match Viewer::new(&event, user.as_ref(), None).leaderboard_visibility() {
                LeaderboardVisibility::NotApplicable => {
                    println!("This event has no leaderboard.");
                }
                LeaderboardVisibility::Hidden => {
                    println!("Scores will be visible once the organizer publishes the leaderboard.");
                }
                LeaderboardVisibility::Visible => {
                    let (teams, individuals) = futures::try_join!(
                        services.results.team_leaderboard(&event_id),
                        services.participation.event_leaderboard(&event_id),
                    )?;
                    println!("Teams");
                    if teams.is_empty() {
                        println!("  No results yet.");
                    } else {
                        println!("{}", render::leaderboard(&teams));
                    }
                    if !individuals.is_empty() {
                        println!("\nIndividuals");
                        for (rank, row) in individuals.iter().enumerate() {
                            println!(
                                "{:>3}. {:<24} {:<20} {}",
                                rank + 1,
                                row.name,
                                row.team_name.as_deref().unwrap_or("-"),
                                row.total_points
                            );
                        }
                    }
                }
            }
        }
    }
    Ok(())
}
