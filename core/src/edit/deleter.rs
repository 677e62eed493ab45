// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use recurcal_ical::{Component, Method, PropertyName, Status, Temporal};

use crate::calendar::Calendar;
use crate::config::Config;
use crate::edit::{
    ChangeDialogOption, ScopeChoices, choose, ensure_supported, implicit_scope, instance_copy,
    is_single_override, message, scope_choices, stamp,
};
use crate::error::EditError;

/// What to delete.
#[derive(Debug, Clone)]
pub struct DeleteParams {
    /// The stored component the occurrence belongs to, a series parent, an
    /// override or a lone component
    pub component: Component,

    /// Start of the occurrence acted on
    pub occurrence: Temporal,

    /// Stored overrides of the series, cancelled along with it
    pub overrides: Vec<Component>,
}

impl DeleteParams {
    /// Delete `occurrence` of `component`.
    #[must_use]
    pub fn new(component: Component, occurrence: Temporal) -> Self {
        Self {
            component,
            occurrence,
            overrides: Vec::new(),
        }
    }

    /// The series' overrides, cancelled too when the whole series goes.
    #[must_use]
    pub fn with_overrides(mut self, overrides: Vec<Component>) -> Self {
        self.overrides = overrides;
        self
    }
}

/// Turns the deletion of an occurrence into CANCEL messages.
#[derive(Debug, Clone)]
pub struct Deleter {
    prod_id: String,
}

impl Default for Deleter {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Deleter {
    /// A deleter writing messages with the configured PRODID.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            prod_id: config.prod_id.clone(),
        }
    }

    /// Delete an occurrence in the scope chosen by `dialog`.
    ///
    /// The dialog is only asked for a repeating series. It gets the legal
    /// scopes and answers with one of them or [`ChangeDialogOption::Cancel`],
    /// which yields no message at all.
    ///
    /// - ONE cancels the single instance.
    /// - ALL cancels the series with its overrides.
    /// - THIS_AND_FUTURE cancels the instance with `RANGE=THISANDFUTURE`.
    ///
    /// On a range override the occurrence is named by its instant in the
    /// original series, and ALL still cancels the whole series.
    ///
    /// # Errors
    /// If the component kind cannot be deleted, the dialog gives no answer
    /// or one that was not offered, or the series cannot be expanded.
    #[tracing::instrument(skip_all, fields(uid = params.component.uid()))]
    pub fn delete(
        &self,
        params: &DeleteParams,
        dialog: impl FnOnce(&ScopeChoices) -> Option<ChangeDialogOption>,
    ) -> Result<Vec<Calendar>, EditError> {
        let component = &params.component;
        ensure_supported(component)?;
        if component.uid().is_none() {
            return Err(EditError::MissingProperty(PropertyName::Uid));
        }

        let scope = match implicit_scope(component) {
            Some(scope) => scope,
            None => {
                let choices = scope_choices(component, &params.occurrence, false)?;
                choose(&choices, dialog)?
            }
        };
        tracing::debug!(%scope, "deleting");

        let mut cancelled = match scope {
            ChangeDialogOption::Cancel => return Ok(Vec::new()),
            ChangeDialogOption::One if is_single_override(component) => vec![component.clone()],
            ChangeDialogOption::One => vec![instance_copy(component, &params.occurrence, false)?],
            ChangeDialogOption::ThisAndFuture => {
                vec![instance_copy(component, &params.occurrence, true)?]
            }
            ChangeDialogOption::All => {
                // a cancel without RECURRENCE-ID names the whole series
                let mut series = component.clone();
                series.set_recurrence_id(None, false);
                let mut all = vec![series];
                all.extend(params.overrides.iter().cloned());
                all
            }
        };
        for c in &mut cancelled {
            c.set_status(Status::Cancelled);
            let sequence = c.sequence();
            stamp(c, sequence);
        }
        Ok(vec![message(Method::Cancel, &self.prod_id, cancelled)])
    }
}
