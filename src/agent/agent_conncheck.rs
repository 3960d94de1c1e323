use super::*;

impl Agent {
    /// Issues a connectivity check for the pair. This is the manual-drive
    /// entry for callers that pace checks themselves; the pacer and the
    /// triggered-check path go through the same machinery.
    pub fn conn_check_send(&mut self, pair_index: usize, use_candidate: bool) -> Result<()> {
        self.send_conn_check(pair_index, use_candidate, Instant::now())
    }

    /// Builds and sends one STUN Binding request for the pair and registers
    /// the in-flight check with its retransmission clock. The pair
    /// transitions to InProgress.
    pub(crate) fn send_conn_check(
        &mut self,
        pair_index: usize,
        use_candidate: bool,
        now: Instant,
    ) -> Result<()> {
        if self.checklist.is_none() {
            return Err(Error::ErrNoChecklist);
        }
        let Some(remote_ufrag) = self.ufrag_pwd.remote_ufrag.clone() else {
            return Err(Error::ErrRemoteUfragEmpty);
        };
        let Some(remote_pwd) = self.ufrag_pwd.remote_pwd.clone() else {
            return Err(Error::ErrRemotePwdEmpty);
        };

        let (local_index, remote_index) = {
            let p = &self.candidate_pairs[pair_index];
            (p.local_index, p.remote_index)
        };
        let local_priority = self.local_candidates[local_index].attr.priority;
        let destination = self.remote_candidates[remote_index].attr.addr;

        // PRIORITY carries the value the local candidate would get as a
        // peer-reflexive candidate (RFC 8445 7.1.1): the type preference
        // octet is overwritten, the rest is kept.
        let prflx_priority = (u32::from(CandidateType::PeerReflexive.preference()) << 24)
            | (local_priority & 0x00ff_ffff);

        let username =
            remote_ufrag + ":" + self.ufrag_pwd.local_credentials.ufrag.as_str();

        let control: Box<dyn Setter> = if self.is_controlling {
            Box::new(AttrControlling(self.tie_breaker))
        } else {
            Box::new(AttrControlled(self.tie_breaker))
        };

        let mut setters: Vec<Box<dyn Setter>> = vec![
            Box::new(BINDING_REQUEST),
            Box::new(TransactionId::new()),
            Box::new(Username::new(ATTR_USERNAME, username)),
        ];
        if use_candidate {
            setters.push(Box::new(UseCandidateAttr::new()));
        }
        setters.push(control);
        setters.push(Box::new(PriorityAttr(prflx_priority)));
        setters.push(Box::new(MessageIntegrity::new_short_term_integrity(
            remote_pwd,
        )));
        setters.push(Box::new(FINGERPRINT));

        let mut msg = Message::new();
        msg.build(&setters)?;

        trace!(
            "[{}]: ping STUN from {} to {}",
            self.get_name(),
            self.local_candidates[local_index],
            self.remote_candidates[remote_index],
        );

        self.set_pair_state(pair_index, CandidatePairState::InProgress);
        self.candidate_pairs[pair_index].binding_request_count += 1;

        if let Some(checklist) = &mut self.checklist {
            checklist.conn_checks.push(ConnCheck {
                pair_index,
                local_index,
                transaction_id: msg.transaction_id,
                destination,
                use_candidate,
                attempt: 0,
                next_rto: now + checklist.rto,
                raw: msg.raw.clone(),
            });
        }

        self.send_stun(&msg.raw, local_index, destination, now);
        Ok(())
    }

    /// Resolves a Binding response against the in-flight check list of the
    /// active checklist. Responses without a matching transaction, with bad
    /// integrity or from an unexpected source are consumed and discarded.
    pub(crate) fn handle_binding_response(
        &mut self,
        m: &mut Message,
        local_index: usize,
        remote_addr: SocketAddr,
    ) -> Result<()> {
        if self.checklist.is_none() {
            trace!(
                "[{}]: response without an active checklist from {}",
                self.get_name(),
                remote_addr
            );
            return Ok(());
        }
        let Some(remote_pwd) = self.ufrag_pwd.remote_pwd.clone() else {
            debug!("[{}]: remote pwd not set, discarding response", self.get_name());
            return Ok(());
        };

        let check_pos = self
            .checklist
            .as_ref()
            .and_then(|cl| cl.find_conn_check(m.transaction_id));
        let Some(check_pos) = check_pos else {
            warn!(
                "[{}]: discard message from ({}), unknown TransactionID 0x{:?}",
                self.get_name(),
                remote_addr,
                m.transaction_id
            );
            return Ok(());
        };

        if let Err(err) = assert_inbound_message_integrity(m, remote_pwd.as_bytes()) {
            warn!(
                "[{}]: discard message from ({}), {}",
                self.get_name(),
                remote_addr,
                err
            );
            return Ok(());
        }

        let check = if let Some(checklist) = &mut self.checklist {
            checklist.conn_checks.remove(check_pos)
        } else {
            return Ok(());
        };

        // The source of the response must match the destination the request
        // was sent to (RFC 8445 7.2.5.2.1).
        if check.destination != remote_addr {
            debug!(
                "[{}]: discard message: transaction source and destination does not match expected({}), actual({})",
                self.get_name(),
                check.destination,
                remote_addr
            );
            return Ok(());
        }

        let pair_index = check.pair_index;
        if !self.check_list.contains(&pair_index) {
            debug!(
                "[{}]: response for a pair no longer on the check list",
                self.get_name()
            );
            return Ok(());
        }

        if m.typ.class == CLASS_SUCCESS_RESPONSE {
            let mut mapped = XorMappedAddress::default();
            if let Err(err) = mapped.get_from(m) {
                warn!(
                    "[{}]: success response without XOR-MAPPED-ADDRESS from ({}): {}",
                    self.get_name(),
                    remote_addr,
                    err
                );
                self.pair_failed(pair_index, Error::from(err), 0);
                self.checklist_update();
                return Ok(());
            }

            let local_addr = self.local_candidates[local_index].attr.addr;
            if mapped.ip != local_addr.ip() || mapped.port != local_addr.port() {
                // The peer saw us on a different transport address, i.e. as a
                // peer-reflexive candidate. The pair validates all the same.
                debug!(
                    "[{}]: mapped address {}:{} differs from local {}",
                    self.get_name(),
                    mapped.ip,
                    mapped.port,
                    local_addr
                );
            }

            trace!(
                "[{}]: inbound STUN (SuccessResponse) from {} to {}",
                self.get_name(),
                remote_addr,
                local_index
            );
            self.make_pair_valid(pair_index, check.use_candidate, m);
            self.checklist_update();
        } else {
            let mut ec = ErrorCodeAttribute::default();
            let scode = match ec.get_from(m) {
                Ok(()) => ec.code.0,
                Err(_) => 0,
            };

            if ec.code == CODE_ROLE_CONFLICT {
                // RFC 8445 7.2.5.1: switch role, recompute pair priorities
                // and retry the pair on a later pace tick.
                debug!(
                    "[{}]: role conflict response from {}",
                    self.get_name(),
                    remote_addr
                );
                self.switch_role();
                self.set_pair_state(pair_index, CandidatePairState::Waiting);
            } else {
                self.pair_failed(pair_index, Error::ErrBindingErrorResponse, scode);
                self.checklist_update();
            }
        }

        Ok(())
    }

    /// The embedded STUN server: authenticates the request, settles role
    /// conflicts, answers with a Binding success carrying the source as
    /// XOR-MAPPED-ADDRESS, learns peer-reflexive candidates and raises
    /// triggered checks.
    pub(crate) fn handle_binding_request(
        &mut self,
        m: &mut Message,
        local_index: usize,
        remote_addr: SocketAddr,
    ) -> Result<()> {
        let local_pwd = self.ufrag_pwd.local_credentials.pwd.clone();
        if let Err(err) = assert_inbound_message_integrity(m, local_pwd.as_bytes()) {
            warn!(
                "[{}]: discard request from ({}), {}",
                self.get_name(),
                remote_addr,
                err
            );
            self.send_binding_error(m, local_index, remote_addr, CODE_UNAUTHORIZED);
            return Ok(());
        }

        let local_ufrag = self.ufrag_pwd.local_credentials.ufrag.clone();
        if let Err(err) = assert_inbound_username_prefix(m, &local_ufrag) {
            warn!(
                "[{}]: discard request from ({}), {}",
                self.get_name(),
                remote_addr,
                err
            );
            self.send_binding_error(m, local_index, remote_addr, CODE_UNAUTHORIZED);
            return Ok(());
        }

        // Role conflict (RFC 8445 7.3.1.1): the peer claims our role. The
        // greater tie-breaker keeps the role and answers 487, the lesser
        // switches.
        if self.is_controlling && m.contains(ATTR_ICE_CONTROLLING) {
            let mut theirs = AttrControlling::default();
            let _ = theirs.get_from(m);
            if self.tie_breaker >= theirs.0 {
                debug!("[{}]: role conflict, keeping role", self.get_name());
                self.send_binding_error(m, local_index, remote_addr, CODE_ROLE_CONFLICT);
                return Ok(());
            }
            self.switch_role();
        } else if !self.is_controlling && m.contains(ATTR_ICE_CONTROLLED) {
            let mut theirs = AttrControlled::default();
            let _ = theirs.get_from(m);
            if self.tie_breaker >= theirs.0 {
                debug!("[{}]: role conflict, keeping role", self.get_name());
                self.send_binding_error(m, local_index, remote_addr, CODE_ROLE_CONFLICT);
                return Ok(());
            }
            self.switch_role();
        }

        self.send_binding_success(m, local_index, remote_addr);

        // Learn a peer-reflexive remote candidate when the source is not a
        // known remote candidate; its priority is taken from the request's
        // PRIORITY attribute.
        let protocol = self.local_candidates[local_index].attr.protocol;
        let remote_index = match self.find_remote_candidate_by_addr(remote_addr, protocol) {
            Some(remote_index) => remote_index,
            None => {
                let component_id = self.local_candidates[local_index].attr.component_id;
                let mut prflx_priority = PriorityAttr::default();
                if prflx_priority.get_from(m).is_err() {
                    prflx_priority.0 = compute_priority(
                        CandidateType::PeerReflexive,
                        DEFAULT_LOCAL_PREFERENCE,
                        component_id,
                    );
                }
                let tcp_type = self.local_candidates[local_index].attr.tcp_type.reverse();
                let foundation = compute_foundation(&remote_addr, CandidateType::PeerReflexive);

                debug!(
                    "[{}]: adding a new peer-reflexive candidate: {}",
                    self.get_name(),
                    remote_addr
                );
                self.add_remote_candidate(
                    component_id,
                    foundation,
                    protocol,
                    prflx_priority.0,
                    remote_addr,
                    CandidateType::PeerReflexive,
                    tcp_type,
                )?
            }
        };

        trace!(
            "[{}]: inbound STUN (Request) from {} to {}",
            self.get_name(),
            remote_addr,
            local_index
        );

        let use_candidate = m.contains(ATTR_USE_CANDIDATE);
        let Some(pair_index) = self.add_pair(local_index, remote_index) else {
            return Ok(());
        };

        match self.candidate_pairs[pair_index].state {
            CandidatePairState::Succeeded => {
                if use_candidate {
                    // The pair already validated; the nomination applies to
                    // the valid pair directly (RFC 8445 7.3.1.5).
                    self.candidate_pairs[pair_index].nominated = true;
                }
            }
            CandidatePairState::Frozen
            | CandidatePairState::Waiting
            | CandidatePairState::Failed => {
                if self.checklist.is_some() {
                    self.candidate_pairs[pair_index].triggered = true;
                    if let Err(err) =
                        self.send_conn_check(pair_index, use_candidate, Instant::now())
                    {
                        self.pair_failed(pair_index, err, 0);
                        self.checklist_update();
                    }
                } else {
                    debug!(
                        "[{}]: triggered check for {} without an active checklist",
                        self.get_name(),
                        self.candidate_pairs[pair_index]
                    );
                }
            }
            CandidatePairState::InProgress => {}
        }

        Ok(())
    }

    pub(crate) fn send_binding_success(
        &mut self,
        m: &Message,
        local_index: usize,
        remote_addr: SocketAddr,
    ) {
        let local_pwd = self.ufrag_pwd.local_credentials.pwd.clone();
        let (ip, port) = (remote_addr.ip(), remote_addr.port());

        let mut out = Message::new();
        let result = out.build(&[
            Box::new(m.clone()),
            Box::new(BINDING_SUCCESS),
            Box::new(XorMappedAddress { ip, port }),
            Box::new(MessageIntegrity::new_short_term_integrity(local_pwd)),
            Box::new(FINGERPRINT),
        ]);

        if let Err(err) = result {
            warn!(
                "[{}]: failed to build binding success for {}: {}",
                self.get_name(),
                remote_addr,
                err
            );
        } else {
            self.send_stun(&out.raw, local_index, remote_addr, Instant::now());
        }
    }

    pub(crate) fn send_binding_error(
        &mut self,
        m: &Message,
        local_index: usize,
        remote_addr: SocketAddr,
        code: ErrorCode,
    ) {
        let local_pwd = self.ufrag_pwd.local_credentials.pwd.clone();

        let mut out = Message::new();
        let result = out.build(&[
            Box::new(m.clone()),
            Box::new(BINDING_ERROR),
            Box::new(ErrorCodeAttribute {
                code,
                reason: vec![],
            }),
            Box::new(MessageIntegrity::new_short_term_integrity(local_pwd)),
            Box::new(FINGERPRINT),
        ]);

        if let Err(err) = result {
            warn!(
                "[{}]: failed to build binding error for {}: {}",
                self.get_name(),
                remote_addr,
                err
            );
        } else {
            self.send_stun(&out.raw, local_index, remote_addr, Instant::now());
        }
    }
}
