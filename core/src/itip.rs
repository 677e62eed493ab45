// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Apply iTIP messages (RFC 5546) to a calendar.

use std::cmp::Ordering;
use std::fmt;

use recurcal_ical::recurrence::previous_recurrence;
use recurcal_ical::{Component, ComponentKind, Method, Property, PropertyName, Temporal};

use crate::calendar::Calendar;

/// One thing [`Calendar::process_message`] did, or refused to do.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessLog {
    /// A component was stored for the first time.
    Added {
        /// UID
        uid: String,
        /// RECURRENCE-ID of an override
        recurrence_id: Option<Temporal>,
    },

    /// A stored component was replaced by a newer revision.
    Replaced {
        /// UID
        uid: String,
        /// RECURRENCE-ID of an override
        recurrence_id: Option<Temporal>,
    },

    /// Components were removed.
    Removed {
        /// UID
        uid: String,
        /// How many components went, parent and overrides together
        count: usize,
    },

    /// A series was cut to end at `until`.
    Truncated {
        /// UID
        uid: String,
        /// Last instance kept
        until: Temporal,
    },

    /// One instance of a series was excluded.
    Excluded {
        /// UID
        uid: String,
        /// The excluded instance
        instance: Temporal,
    },

    /// A VTIMEZONE was added.
    TimeZoneAdded {
        /// TZID
        tzid: String,
    },

    /// Part of the message was not applied.
    Rejected {
        /// UID of the rejected component, if it has one
        uid: Option<String>,
        /// Why
        reason: String,
    },
}

impl fmt::Display for ProcessLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessLog::Added { uid, recurrence_id } => {
                write!(f, "added {uid}")?;
                write_rid(f, recurrence_id.as_ref())
            }
            ProcessLog::Replaced { uid, recurrence_id } => {
                write!(f, "replaced {uid}")?;
                write_rid(f, recurrence_id.as_ref())
            }
            ProcessLog::Removed { uid, count } => write!(f, "removed {count} of {uid}"),
            ProcessLog::Truncated { uid, until } => write!(f, "truncated {uid} until {until}"),
            ProcessLog::Excluded { uid, instance } => write!(f, "excluded {uid} at {instance}"),
            ProcessLog::TimeZoneAdded { tzid } => write!(f, "added time zone {tzid}"),
            ProcessLog::Rejected { uid, reason } => match uid {
                Some(uid) => write!(f, "rejected {uid}: {reason}"),
                None => write!(f, "rejected: {reason}"),
            },
        }
    }
}

fn write_rid(f: &mut fmt::Formatter<'_>, recurrence_id: Option<&Temporal>) -> fmt::Result {
    match recurrence_id {
        Some(rid) => write!(f, " at {rid}"),
        None => Ok(()),
    }
}

impl Calendar {
    /// Apply an iTIP message to this calendar.
    ///
    /// Every component of the message is applied on its own and the outcome
    /// logged; bad parts are rejected without affecting the rest.
    ///
    /// - CANCEL without RECURRENCE-ID removes the series with all overrides.
    /// - CANCEL with RECURRENCE-ID excludes that instance from the parent
    ///   and removes its override; a lone component is removed.
    /// - CANCEL with `RANGE=THISANDFUTURE` ends the series before the anchor
    ///   and removes the overrides from there on.
    /// - PUBLISH, REQUEST and ADD store components whose SEQUENCE is newer
    ///   than the stored one.
    /// - VTIMEZONE components are added when their TZID is new.
    #[tracing::instrument(skip_all, fields(method = ?message.method()))]
    pub fn process_message(&mut self, message: &Calendar) -> Vec<ProcessLog> {
        let mut log = Vec::new();
        let method = message.method();
        for component in message.components() {
            if component.kind == ComponentKind::VTimeZone {
                self.add_time_zone(component, &mut log);
                continue;
            }

            let uid = component.uid();
            if !component.kind.is_displayable() {
                reject(&mut log, uid, format!("{} cannot be scheduled", component.kind));
                continue;
            }
            let Some(uid) = uid else {
                reject(&mut log, None, "component has no UID".to_string());
                continue;
            };

            match method {
                Some(Method::Cancel) => self.cancel(uid, component, &mut log),
                Some(Method::Publish | Method::Request | Method::Add) => {
                    self.store(uid, component, message, &mut log);
                }
                Some(other) => {
                    reject(&mut log, Some(uid), format!("METHOD:{other} is not supported"));
                }
                None => reject(&mut log, Some(uid), "message has no METHOD".to_string()),
            }
        }
        log
    }

    fn cancel(&mut self, uid: &str, component: &Component, log: &mut Vec<ProcessLog>) {
        let Some(rid) = component.recurrence_id() else {
            let count = self.remove_series(uid);
            tracing::debug!(uid, count, "cancelled series");
            if count > 0 {
                log.push(ProcessLog::Removed {
                    uid: uid.to_string(),
                    count,
                });
            }
            return;
        };

        if component.is_this_and_future() {
            self.truncate(uid, rid, log);
            return;
        }

        let owner = self.segment_anchor(uid, rid);
        match self.segment_mut(uid, owner.as_ref()) {
            Some(segment) if segment.is_recurring() => {
                let instance = match segment_time(segment, rid) {
                    Ok(instance) => instance,
                    Err(err) => {
                        reject(log, Some(uid), format!("cannot place {rid}: {err}"));
                        return;
                    }
                };
                if !segment.exdates().iter().any(|d| d.same_instant(&instance)) {
                    segment.add_property(Property::from_temporal(PropertyName::ExDate, &instance));
                }
                tracing::debug!(uid, %instance, "excluded instance");
                log.push(ProcessLog::Excluded {
                    uid: uid.to_string(),
                    instance,
                });
                let count = self.remove_where(|c| is_single_at(c, uid, rid));
                if count > 0 {
                    log.push(ProcessLog::Removed {
                        uid: uid.to_string(),
                        count,
                    });
                }
            }
            Some(_) if owner.is_none() => {
                let count = self.remove_series(uid);
                tracing::debug!(uid, count, "cancelled lone component");
                log.push(ProcessLog::Removed {
                    uid: uid.to_string(),
                    count,
                });
            }
            _ => {
                let count = self.remove_where(|c| is_override_at(c, uid, rid));
                tracing::debug!(uid, count, "cancelled override without a series");
                if count > 0 {
                    log.push(ProcessLog::Removed {
                        uid: uid.to_string(),
                        count,
                    });
                }
            }
        }
    }

    /// End the series before `anchor` and drop the overrides from there on.
    /// Returns whether anything of the series is left.
    ///
    /// The cut goes into the segment holding `anchor`: the parent, or the
    /// latest range override anchored at or before it.
    fn truncate(&mut self, uid: &str, anchor: &Temporal, log: &mut Vec<ProcessLog>) -> bool {
        let owner = self.segment_anchor(uid, anchor);
        let Some(segment) = self.segment_mut(uid, owner.as_ref()) else {
            self.remove_overrides_from(uid, anchor, log);
            return false;
        };

        let local = match segment_time(segment, anchor) {
            Ok(local) => local,
            Err(err) => {
                reject(log, Some(uid), format!("cannot place {anchor}: {err}"));
                return true;
            }
        };
        let previous = match previous_recurrence(segment, &local) {
            Ok(previous) => previous,
            Err(err) => {
                reject(log, Some(uid), format!("cannot expand series: {err}"));
                return true;
            }
        };
        let Some(until) = previous else {
            if owner.is_some() {
                // the range override starts here and goes with the rest
                self.remove_overrides_from(uid, anchor, log);
                return true;
            }
            let count = self.remove_series(uid);
            tracing::debug!(uid, count, "nothing left before the anchor, removed series");
            log.push(ProcessLog::Removed {
                uid: uid.to_string(),
                count,
            });
            return false;
        };

        if let Some(mut rule) = segment.rrule().cloned() {
            rule.until = Some(until_value(&until));
            rule.count = None;
            segment.set_rrule(Some(rule));
        }
        let before_local = |t: &Temporal| t.compare(&local) == Ordering::Less;
        let rdates = segment.rdates();
        if !rdates.iter().all(before_local) {
            let kept: Vec<_> = rdates.into_iter().filter(before_local).collect();
            segment.set_rdates(&kept);
        }
        let exdates = segment.exdates();
        if !exdates.iter().all(before_local) {
            let kept: Vec<_> = exdates.into_iter().filter(before_local).collect();
            segment.set_exdates(&kept);
        }
        tracing::debug!(uid, %until, "truncated series");
        log.push(ProcessLog::Truncated {
            uid: uid.to_string(),
            until,
        });

        self.remove_overrides_from(uid, anchor, log);
        true
    }

    fn remove_overrides_from(&mut self, uid: &str, anchor: &Temporal, log: &mut Vec<ProcessLog>) {
        let count = self.remove_where(|c| is_override_from(c, uid, anchor));
        if count > 0 {
            log.push(ProcessLog::Removed {
                uid: uid.to_string(),
                count,
            });
        }
    }

    /// RECURRENCE-ID of the range override whose segment holds `instant`,
    /// `None` for the parent's.
    fn segment_anchor(&self, uid: &str, instant: &Temporal) -> Option<Temporal> {
        self.overrides(uid)
            .filter(|c| c.is_this_and_future())
            .filter_map(Component::recurrence_id)
            .filter(|anchor| anchor.compare(instant) != Ordering::Greater)
            .max_by(|a, b| a.compare(b))
            .cloned()
    }

    fn segment_mut(&mut self, uid: &str, anchor: Option<&Temporal>) -> Option<&mut Component> {
        match anchor {
            None => self.find_mut(uid, None),
            Some(anchor) => self
                .root_mut()
                .components_mut()
                .find(|c| c.is_this_and_future() && is_override_at(c, uid, anchor)),
        }
    }

    fn store(
        &mut self,
        uid: &str,
        component: &Component,
        message: &Calendar,
        log: &mut Vec<ProcessLog>,
    ) {
        let rid = component.recurrence_id().cloned();
        let existing = self
            .components()
            .find(|c| c.uid() == Some(uid) && same_slot(c, component))
            .map(Component::sequence);
        if let Some(stored) = existing
            && component.sequence() <= stored
        {
            tracing::warn!(uid, incoming = component.sequence(), stored, "stale revision");
            let reason = format!(
                "SEQUENCE {} is not newer than {stored}",
                component.sequence()
            );
            reject(log, Some(uid), reason);
            return;
        }

        let mut component = component.clone();
        match &rid {
            Some(anchor) if component.is_this_and_future() => {
                if !self.truncate(uid, anchor, log) {
                    // nothing of the old series is left, so this becomes it
                    component.set_recurrence_id(None, false);
                }
                self.push(component.clone());
            }
            Some(_) => self.put(uid, component.clone()),
            None => {
                let resent: Vec<Temporal> = message
                    .overrides(uid)
                    .filter_map(Component::recurrence_id)
                    .cloned()
                    .collect();
                let dropped = self.remove_where(|c| {
                    c.uid() == Some(uid)
                        && c.recurrence_id()
                            .is_some_and(|r| !resent.iter().any(|s| s.same_instant(r)))
                });
                if dropped > 0 {
                    tracing::debug!(uid, dropped, "dropped overrides not sent again");
                    log.push(ProcessLog::Removed {
                        uid: uid.to_string(),
                        count: dropped,
                    });
                }
                self.put(uid, component.clone());
            }
        }

        let recurrence_id = component.recurrence_id().cloned();
        tracing::debug!(uid, replaced = existing.is_some(), "stored component");
        log.push(match existing {
            Some(_) => ProcessLog::Replaced {
                uid: uid.to_string(),
                recurrence_id,
            },
            None => ProcessLog::Added {
                uid: uid.to_string(),
                recurrence_id,
            },
        });
    }

    /// Replace the stored revision of `component` in place, or append it.
    fn put(&mut self, uid: &str, component: Component) {
        let slot = self
            .root_mut()
            .components_mut()
            .find(|c| c.uid() == Some(uid) && same_slot(c, &component));
        match slot {
            Some(slot) => *slot = component,
            None => self.push(component),
        }
    }

    fn add_time_zone(&mut self, component: &Component, log: &mut Vec<ProcessLog>) {
        let Some(tzid) = component.tzid() else {
            reject(log, None, "VTIMEZONE has no TZID".to_string());
            return;
        };
        if self
            .components_of(&ComponentKind::VTimeZone)
            .any(|c| c.tzid() == Some(tzid))
        {
            tracing::debug!(tzid, "time zone already present");
            return;
        }

        // keep time zones ahead of the components that use them
        let index = self.root().children().iter().position(|(_, c)| {
            c.as_component()
                .is_some_and(|c| c.kind != ComponentKind::VTimeZone)
        });
        let root = self.root_mut();
        match index {
            Some(index) => root.children_mut().insert(index, component.clone()),
            None => root.push_component(component.clone()),
        };
        log.push(ProcessLog::TimeZoneAdded {
            tzid: tzid.to_string(),
        });
    }
}

fn reject(log: &mut Vec<ProcessLog>, uid: Option<&str>, reason: String) {
    tracing::warn!(uid, %reason, "rejected message component");
    log.push(ProcessLog::Rejected {
        uid: uid.map(str::to_string),
        reason,
    });
}

fn is_override_at(component: &Component, uid: &str, rid: &Temporal) -> bool {
    component.uid() == Some(uid)
        && component
            .recurrence_id()
            .is_some_and(|r| r.same_instant(rid))
}

fn is_single_at(component: &Component, uid: &str, rid: &Temporal) -> bool {
    !component.is_this_and_future() && is_override_at(component, uid, rid)
}

/// Whether `a` and `b` are revisions of the same thing: the parent, one
/// single override, or one range override.
fn same_slot(a: &Component, b: &Component) -> bool {
    match (a.recurrence_id(), b.recurrence_id()) {
        (None, None) => true,
        (Some(x), Some(y)) => {
            x.same_instant(y) && a.is_this_and_future() == b.is_this_and_future()
        }
        _ => false,
    }
}

/// Instant `instant` of the original series as `segment` produces it:
/// a range override shifts its instances by the wall-clock difference
/// from its RECURRENCE-ID to its DTSTART.
fn segment_time(segment: &Component, instant: &Temporal) -> Result<Temporal, jiff::Error> {
    let Some(start) = segment.dtstart() else {
        return Ok(instant.clone());
    };
    let shifted = match segment.recurrence_id() {
        Some(anchor) if segment.is_this_and_future() => {
            instant.shift_wall_clock(anchor.wall_clock_until(start)?)?
        }
        _ => instant.clone(),
    };
    shifted.coerce_to(start)
}

fn is_override_from(component: &Component, uid: &str, anchor: &Temporal) -> bool {
    component.uid() == Some(uid)
        && component
            .recurrence_id()
            .is_some_and(|r| r.compare(anchor) != Ordering::Less)
}

/// UNTIL must be UTC when DTSTART is bound to a zone.
fn until_value(last: &Temporal) -> Temporal {
    match last {
        Temporal::Zoned(z) => Temporal::Utc(z.timestamp()),
        other => other.clone(),
    }
}
