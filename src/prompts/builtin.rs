//! Built-in conversation prompts.

use std::sync::Arc;

use super::prompt::{
    Prompt, PromptArgs, PromptArgument, PromptError, PromptMessage, PromptResult, arg, choice,
};
use crate::directory::RestaurantDirectory;

pub struct ReservationAssistantPrompt;

impl Prompt for ReservationAssistantPrompt {
    fn name(&self) -> &str {
        "reservation_assistant"
    }

    fn description(&self) -> &str {
        "Guide users through making a restaurant reservation with a conversational approach"
    }

    fn arguments(&self) -> Vec<PromptArgument> {
        vec![
            PromptArgument::optional("restaurant", "Restaurant name (optional)"),
            PromptArgument::optional("occasion", "Special occasion (optional)"),
        ]
    }

    fn render(&self, args: &PromptArgs) -> Result<PromptResult, PromptError> {
        let restaurant = arg(args, "restaurant");
        let at = restaurant.map(|r| format!(" at {}", r)).unwrap_or_default();
        let occasion = arg(args, "occasion")
            .map(|o| format!(" for {}", o))
            .unwrap_or_default();

        let mut needs = vec![
            "**Date**: When would you like to dine? (YYYY-MM-DD format)",
            "**Time**: What time works best? (e.g., 7:00 PM)",
            "**Party Size**: How many guests?",
            "**Contact**: Your email and phone number for confirmation",
        ];
        if restaurant.is_none() {
            needs.push("**Restaurant**: Which restaurant would you prefer?");
        }

        Ok(PromptResult {
            description: "Interactive reservation assistant".to_string(),
            messages: vec![
                PromptMessage::user(format!("I'd like to make a reservation{}{}.", at, occasion)),
                PromptMessage::assistant(format!(
                    "I'd be happy to help you make a reservation{}! To find the perfect table for you, I'll need:\n\n{}\n\nPlease provide these details and I'll check availability.",
                    at,
                    numbered(&needs)
                )),
            ],
        })
    }
}

pub struct FindReservationsPrompt;

impl Prompt for FindReservationsPrompt {
    fn name(&self) -> &str {
        "find_reservations"
    }

    fn description(&self) -> &str {
        "Help users locate their existing reservations"
    }

    fn arguments(&self) -> Vec<PromptArgument> {
        vec![PromptArgument::optional(
            "search_type",
            "Type of search: confirmation, date or email",
        )]
    }

    fn render(&self, args: &PromptArgs) -> Result<PromptResult, PromptError> {
        let guidance = match choice(args, "search_type", &["confirmation", "date", "email"])? {
            Some("confirmation") => "Please provide your confirmation number.",
            Some("date") => "Please provide the date of your reservation (YYYY-MM-DD format).",
            Some(_) => "Please provide the email address used for the reservation.",
            None => {
                "I can help you find your reservation using:\n- Confirmation number\n- Date of reservation\n- Email address\n- Phone number\n- Your name"
            }
        };

        Ok(PromptResult {
            description: "Reservation lookup assistant".to_string(),
            messages: vec![
                PromptMessage::user("I need to find my reservation."),
                PromptMessage::assistant(guidance),
            ],
        })
    }
}

pub struct CheckAvailabilityPrompt;

impl Prompt for CheckAvailabilityPrompt {
    fn name(&self) -> &str {
        "check_availability"
    }

    fn description(&self) -> &str {
        "Check available time slots at a restaurant"
    }

    fn arguments(&self) -> Vec<PromptArgument> {
        vec![
            PromptArgument::required("restaurant", "Restaurant name"),
            PromptArgument::optional("date", "Preferred date (YYYY-MM-DD)"),
            PromptArgument::optional("time", "Preferred time (HH:MM AM/PM)"),
        ]
    }

    fn render(&self, args: &PromptArgs) -> Result<PromptResult, PromptError> {
        let restaurant = arg(args, "restaurant")
            .ok_or_else(|| PromptError::MissingArgument("restaurant".to_string()))?;
        let date = arg(args, "date");
        let time = arg(args, "time");

        let mut needs = Vec::new();
        if date.is_none() {
            needs.push("**Date**: Which day would you like to dine? (YYYY-MM-DD)");
        }
        if time.is_none() {
            needs.push("**Time**: What time are you thinking? (e.g., 7:00 PM)");
        }
        needs.push("**Party Size**: How many guests?");

        let on = date.map(|d| format!(" on {}", d)).unwrap_or_default();
        let around = time.map(|t| format!(" around {}", t)).unwrap_or_default();

        Ok(PromptResult {
            description: "Availability checker".to_string(),
            messages: vec![
                PromptMessage::user(format!(
                    "What times are available at {}{}{}?",
                    restaurant, on, around
                )),
                PromptMessage::assistant(format!(
                    "I'll check availability at {} for you. I need:\n\n{}\n\nOnce I have these details, I'll show you available time slots.",
                    restaurant,
                    numbered(&needs)
                )),
            ],
        })
    }
}

pub struct CancelReservationPrompt;

impl Prompt for CancelReservationPrompt {
    fn name(&self) -> &str {
        "cancel_reservation"
    }

    fn description(&self) -> &str {
        "Guide users through canceling a reservation"
    }

    fn arguments(&self) -> Vec<PromptArgument> {
        vec![PromptArgument::optional(
            "confirmation_number",
            "Confirmation number",
        )]
    }

    fn render(&self, args: &PromptArgs) -> Result<PromptResult, PromptError> {
        let number = arg(args, "confirmation_number");
        let user = match number {
            Some(n) => format!("I need to cancel my reservation ({}).", n),
            None => "I need to cancel my reservation.".to_string(),
        };
        let ask = if number.is_none() {
            "Please provide your confirmation number, and "
        } else {
            ""
        };

        Ok(PromptResult {
            description: "Reservation cancellation assistant".to_string(),
            messages: vec![
                PromptMessage::user(user),
                PromptMessage::assistant(format!(
                    "I can help you cancel your reservation. {}I'll process the cancellation for you.\n\n**Note**: Please review the restaurant's cancellation policy for any applicable fees or deadlines.",
                    ask
                )),
            ],
        })
    }
}

/// Lists the restaurants actually in the directory.
pub struct BrowseRestaurantsPrompt {
    directory: Arc<RestaurantDirectory>,
}

impl BrowseRestaurantsPrompt {
    pub fn new(directory: Arc<RestaurantDirectory>) -> Self {
        Self { directory }
    }
}

impl Prompt for BrowseRestaurantsPrompt {
    fn name(&self) -> &str {
        "browse_restaurants"
    }

    fn description(&self) -> &str {
        "Help users discover available restaurants"
    }

    fn render(&self, _args: &PromptArgs) -> Result<PromptResult, PromptError> {
        let listing = self
            .directory
            .names()
            .iter()
            .map(|name| format!("**{}**", name))
            .collect::<Vec<_>>()
            .join("\n");

        Ok(PromptResult {
            description: "Restaurant discovery assistant".to_string(),
            messages: vec![
                PromptMessage::user("What restaurants are available?"),
                PromptMessage::assistant(format!(
                    "Here are the available restaurants:\n\n{}\n\nWhich restaurant interests you? I can help you check availability and make a reservation!",
                    listing
                )),
            ],
        })
    }
}

pub struct TroubleshootBookingPrompt;

impl Prompt for TroubleshootBookingPrompt {
    fn name(&self) -> &str {
        "troubleshoot_booking"
    }

    fn description(&self) -> &str {
        "Help users resolve booking issues"
    }

    fn arguments(&self) -> Vec<PromptArgument> {
        vec![PromptArgument::optional(
            "issue_type",
            "One of no_availability, error, modification, special_request",
        )]
    }

    fn render(&self, args: &PromptArgs) -> Result<PromptResult, PromptError> {
        let issue = choice(
            args,
            "issue_type",
            &["no_availability", "error", "modification", "special_request"],
        )?;
        let guidance = match issue {
            Some("no_availability") => {
                "If your preferred time isn't available, I can:\n1. Check nearby time slots\n2. Suggest alternative dates\n3. Check other restaurants with similar cuisine"
            }
            Some("error") => "I'll help resolve any booking errors. Please describe what happened.",
            Some("modification") => {
                "To modify your reservation, I'll need your confirmation number. What would you like to change?"
            }
            Some(_) => {
                "Please describe your special request (dietary restrictions, accessibility needs, etc.)"
            }
            None => {
                "I can help with:\n- No available times\n- Booking errors\n- Modifying reservations\n- Special requests or accommodations"
            }
        };

        Ok(PromptResult {
            description: "Booking troubleshooting assistant".to_string(),
            messages: vec![PromptMessage::assistant(guidance)],
        })
    }
}

fn numbered(items: &[&str]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item))
        .collect::<Vec<_>>()
        .join("\n")
}
