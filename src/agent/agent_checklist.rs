use super::*;

impl Agent {
    /// Starts the checklist. A second call is a no-op returning success. The
    /// remote password must be set first, since every outbound check is
    /// integrity-protected with it. The first pace tick is due immediately;
    /// `poll_timeout`/`handle_timeout` drive it.
    pub fn start_checklist(&mut self, interval: Duration, use_candidate: bool) -> Result<()> {
        if self.checklist.is_some() {
            return Ok(());
        }
        if self.ufrag_pwd.remote_pwd.as_deref().unwrap_or("").is_empty() {
            warn!("[{}]: start: remote password not set", self.get_name());
            return Err(Error::ErrRemotePwdEmpty);
        }

        let interval = if interval.is_zero() {
            DEFAULT_CHECK_INTERVAL
        } else {
            interval
        };

        self.checklist = Some(Checklist {
            state: ChecklistState::Running,
            interval,
            use_candidate,
            next_pace: Instant::now(),
            conn_checks: vec![],
            rto: self.binding_request_rto,
            max_attempts: self.max_binding_requests,
        });
        self.set_waiting_for_all_foundations();
        self.events
            .push_back(Event::ChecklistStateChange(ChecklistState::Running));

        debug!(
            "[{}]: checklist started, interval {:?}, use_candidate {}",
            self.get_name(),
            interval,
            use_candidate
        );
        Ok(())
    }

    /// For all pairs with the same foundation, sets the state of the pair
    /// with the lowest component ID to Waiting; ties go to the higher pair
    /// priority. Invoked once before the first pace tick; invoking it again
    /// cannot unfreeze a second pair of an already unfrozen group.
    pub fn set_waiting_for_all_foundations(&mut self) {
        let mut chosen = vec![];
        for i in 0..self.check_list.len() {
            let mut best = self.check_list[i];
            for j in 0..self.check_list.len() {
                let other = self.check_list[j];
                if !self.cmp_pair_foundation(best, other) {
                    continue;
                }
                let (best_comp, best_prio) = self.pair_sort_key(best);
                let (other_comp, other_prio) = self.pair_sort_key(other);
                if other_comp < best_comp || (other_comp == best_comp && other_prio > best_prio) {
                    best = other;
                }
            }
            if self.candidate_pairs[best].state == CandidatePairState::Frozen {
                chosen.push(best);
            }
        }
        for pair_index in chosen {
            self.set_pair_state(pair_index, CandidatePairState::Waiting);
        }
    }

    /// Two pairs share a foundation when both their local and their remote
    /// candidate foundations are equal.
    fn cmp_pair_foundation(&self, a: usize, b: usize) -> bool {
        let (pa, pb) = (&self.candidate_pairs[a], &self.candidate_pairs[b]);
        self.local_candidates[pa.local_index].attr.foundation
            == self.local_candidates[pb.local_index].attr.foundation
            && self.remote_candidates[pa.remote_index].attr.foundation
                == self.remote_candidates[pb.remote_index].attr.foundation
    }

    fn pair_sort_key(&self, pair_index: usize) -> (u16, u64) {
        let p = &self.candidate_pairs[pair_index];
        (
            self.local_candidates[p.local_index].attr.component_id,
            p.priority(),
        )
    }

    /// One pace tick: issue at most one new check. The highest Waiting pair
    /// goes first; failing that, the highest Frozen pair is unfrozen
    /// implicitly by checking it. A send error fails the pair with a zero
    /// STUN code.
    pub(crate) fn schedule_check(&mut self, now: Instant) {
        let use_candidate = match &self.checklist {
            Some(checklist) => checklist.use_candidate,
            None => return,
        };

        let pair_index = self
            .find_pair_by_state(CandidatePairState::Waiting)
            .or_else(|| self.find_pair_by_state(CandidatePairState::Frozen));

        if let Some(pair_index) = pair_index {
            if let Err(err) = self.send_conn_check(pair_index, use_candidate, now) {
                self.pair_failed(pair_index, err, 0);
            }
        }
    }

    /// Moves the checklist to Completed or Failed once every pair in the
    /// check list is completed; Completed requires a non-empty valid list.
    /// The pace clock stops with the Running state.
    pub(crate) fn checklist_update(&mut self) {
        let Some(checklist) = &self.checklist else {
            return;
        };
        if checklist.state != ChecklistState::Running {
            return;
        }
        if !self.checklist_is_completed() {
            return;
        }

        let state = if self.valid_list.is_empty() {
            ChecklistState::Failed
        } else {
            ChecklistState::Completed
        };
        if let Some(checklist) = &mut self.checklist {
            checklist.state = state;
        }
        info!("[{}]: checklist {}", self.get_name(), state);
        self.events.push_back(Event::ChecklistStateChange(state));
    }

    /// True once every pair in the check list is either Succeeded or Failed.
    pub fn checklist_is_completed(&self) -> bool {
        self.check_list
            .iter()
            .all(|&pi| self.candidate_pairs[pi].is_completed())
    }

    pub fn checklist_is_running(&self) -> bool {
        matches!(
            self.checklist.as_ref().map(|cl| cl.state),
            Some(ChecklistState::Running)
        )
    }

    /// The checklist state; Idle as long as no checklist was started.
    pub fn checklist_state(&self) -> ChecklistState {
        self.checklist
            .as_ref()
            .map_or(ChecklistState::Idle, |cl| cl.state)
    }

    /// Retransmits in-flight checks whose deadline passed and fails the
    /// pairs whose checks ran out of attempts.
    pub(crate) fn handle_conn_check_timeouts(&mut self, now: Instant) {
        let (rto, max_attempts) = match &self.checklist {
            Some(checklist) => (checklist.rto, checklist.max_attempts),
            None => return,
        };

        let mut expired = vec![];
        let mut retransmits = vec![];
        if let Some(checklist) = &mut self.checklist {
            let mut i = 0;
            while i < checklist.conn_checks.len() {
                if checklist.conn_checks[i].next_rto <= now {
                    if checklist.conn_checks[i].attempt + 1 >= max_attempts {
                        expired.push(checklist.conn_checks.remove(i));
                        continue;
                    }
                    let cc = &mut checklist.conn_checks[i];
                    cc.attempt += 1;
                    cc.next_rto = cc.next_timeout(now, rto);
                    retransmits.push((cc.local_index, cc.destination, cc.raw.clone()));
                }
                i += 1;
            }
        }

        for (local_index, destination, raw) in retransmits {
            trace!(
                "[{}]: retransmit binding request to {}",
                self.get_name(),
                destination
            );
            self.send_stun(&raw, local_index, destination, now);
        }
        for check in expired {
            if self.check_list.contains(&check.pair_index) {
                debug!(
                    "[{}]: conncheck timeout for pair {}",
                    self.get_name(),
                    self.candidate_pairs[check.pair_index]
                );
                self.pair_failed(check.pair_index, Error::ErrBindingRequestTimeout, 0);
            }
        }
    }

    /// One scheduler turn: sweep retransmissions, run the pace tick when it
    /// is due, then settle the checklist state.
    pub(crate) fn contact(&mut self, now: Instant) {
        if !self.checklist_is_running() {
            return;
        }

        self.handle_conn_check_timeouts(now);

        let pace_due = self
            .checklist
            .as_ref()
            .map(|checklist| checklist.next_pace <= now)
            .unwrap_or(false);
        if pace_due && self.checklist_is_running() {
            self.schedule_check(now);
            if let Some(checklist) = &mut self.checklist {
                checklist.next_pace = now + checklist.interval;
            }
        }

        self.checklist_update();
    }

    /// The next deadline the caller must feed back via `handle_timeout`.
    /// The pace deadline is withheld while no pair is Waiting or Frozen; it
    /// reappears as soon as trickled candidates create new pairs.
    pub(crate) fn next_timeout(&self) -> Option<Instant> {
        let checklist = self.checklist.as_ref()?;
        if checklist.state != ChecklistState::Running {
            return None;
        }

        let pace_work = self.check_list.iter().any(|&pi| {
            matches!(
                self.candidate_pairs[pi].state,
                CandidatePairState::Waiting | CandidatePairState::Frozen
            )
        }) || self.checklist_is_completed();

        let mut deadline = if pace_work {
            Some(checklist.next_pace)
        } else {
            None
        };
        for cc in &checklist.conn_checks {
            deadline = Some(deadline.map_or(cc.next_rto, |d| d.min(cc.next_rto)));
        }
        deadline
    }
}
