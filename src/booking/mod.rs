//! Booking submission flow.
//!
//! A [`BookingForm`] collects the date, slot and contact details for one
//! studio. `submit` validates the fields in a fixed order and reports only the
//! first problem. It then re-checks the slot against the store and appends the
//! booking. A rejected submission leaves the form editable. A successful one
//! moves it to [`FormState::Confirmed`].

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::availability::{self, TimeSlot};
use crate::db::BookingStore;
use crate::errors::AppError;
use crate::models::{Booking, CreateBookingRequest, Studio};

/// Where a confirmed booking can be viewed.
pub const BOOKINGS_URL: &str = "/api/bookings";

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));

/// Where the form is in its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum FormState {
    Editing,
    Confirmed(Booking),
}

/// Fields that passed validation, ready to be booked.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedBooking {
    pub date: NaiveDate,
    pub time_slot: String,
    pub user_name: String,
    pub user_email: String,
}

/// Booking form for one studio.
#[derive(Debug, Clone)]
pub struct BookingForm<'a> {
    studio: &'a Studio,
    date: Option<String>,
    time_slot: Option<String>,
    user_name: String,
    user_email: String,
    error: Option<String>,
    state: FormState,
}

impl<'a> BookingForm<'a> {
    pub fn new(studio: &'a Studio) -> Self {
        Self {
            studio,
            date: None,
            time_slot: None,
            user_name: String::new(),
            user_email: String::new(),
            error: None,
            state: FormState::Editing,
        }
    }

    /// Fill a fresh form from an API request body.
    pub fn from_request(studio: &'a Studio, request: &CreateBookingRequest) -> Self {
        let mut form = Self::new(studio);
        if let Some(date) = &request.date {
            form.select_date(date.as_str());
        }
        if let Some(slot) = &request.time_slot {
            form.select_slot(slot.as_str());
        }
        if let Some(name) = &request.user_name {
            form.set_name(name.as_str());
        }
        if let Some(email) = &request.user_email {
            form.set_email(email.as_str());
        }
        form
    }

    /// Picking a new date clears the chosen slot.
    pub fn select_date(&mut self, date: impl Into<String>) {
        self.date = Some(date.into());
        self.time_slot = None;
    }

    pub fn select_slot(&mut self, slot: impl Into<String>) {
        self.time_slot = Some(slot.into());
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.user_name = name.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.user_email = email.into();
    }

    /// Current lifecycle state. HTTP handlers build a fresh form per request
    /// and never read it back.
    #[allow(dead_code)]
    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// The message from the last rejected submission, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Discard all input and return to an empty, editable form.
    ///
    /// Each request gets its own form, so the HTTP layer closes implicitly by
    /// dropping it.
    #[allow(dead_code)]
    pub fn close(&mut self) {
        *self = Self::new(self.studio);
    }

    /// Check the fields in order and stop at the first failure.
    pub fn validate(&self) -> Result<ValidatedBooking, AppError> {
        let date = match self.date.as_deref().map(str::trim) {
            None | Some("") => return Err(invalid("Please select a date")),
            Some(raw) => raw
                .parse::<NaiveDate>()
                .map_err(|_| invalid("Please select a valid date"))?,
        };

        let time_slot = match self.time_slot.as_deref().map(str::trim) {
            None | Some("") => return Err(invalid("Please select a time slot")),
            Some(slot) => slot.to_string(),
        };

        let user_name = self.user_name.trim();
        if user_name.is_empty() {
            return Err(invalid("Please enter your name"));
        }

        let user_email = self.user_email.trim();
        if user_email.is_empty() {
            return Err(invalid("Please enter your email"));
        }
        if !EMAIL_PATTERN.is_match(user_email) {
            return Err(invalid("Please enter a valid email address"));
        }

        Ok(ValidatedBooking {
            date,
            time_slot,
            user_name: user_name.to_string(),
            user_email: user_email.to_string(),
        })
    }

    /// Validate, re-check availability and persist the booking.
    ///
    /// Submitting an already confirmed form returns the existing booking.
    pub async fn submit(&mut self, store: &dyn BookingStore) -> Result<Booking, AppError> {
        if let FormState::Confirmed(booking) = &self.state {
            return Ok(booking.clone());
        }

        self.error = None;
        let result = self.try_submit(store).await;
        match result {
            Ok(booking) => {
                tracing::info!(
                    booking_id = %booking.id,
                    studio_id = booking.studio_id,
                    date = %booking.date,
                    time_slot = %booking.time_slot,
                    "Booking confirmed"
                );
                self.state = FormState::Confirmed(booking.clone());
                Ok(booking)
            }
            Err(err) => {
                if matches!(
                    err,
                    AppError::Validation(_) | AppError::SlotUnavailable(_)
                ) {
                    self.error = Some(err.message().to_string());
                }
                Err(err)
            }
        }
    }

    async fn try_submit(&self, store: &dyn BookingStore) -> Result<Booking, AppError> {
        let valid = self.validate()?;

        let slot: TimeSlot = valid
            .time_slot
            .parse()
            .map_err(|_| invalid("Please select a valid time slot"))?;
        let offered = availability::generate_slots(
            &self.studio.availability.open,
            &self.studio.availability.close,
        )?;
        if !offered.contains(&slot) {
            return Err(invalid("Please select a valid time slot"));
        }
        let label = slot.label();

        let booked = store.booked_slots(self.studio.id, valid.date).await?;
        if booked.iter().any(|b| *b == label) {
            tracing::warn!(
                studio_id = self.studio.id,
                date = %valid.date,
                time_slot = %label,
                "Slot already booked"
            );
            return Err(AppError::slot_unavailable());
        }

        let booking = Booking::new(
            self.studio,
            valid.date,
            label,
            valid.user_name,
            valid.user_email,
        );
        store.append(&booking).await?;

        Ok(booking)
    }
}

fn invalid(message: &str) -> AppError {
    AppError::Validation(message.to_string())
}
