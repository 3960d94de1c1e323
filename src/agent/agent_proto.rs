use super::*;

impl sansio::Protocol<TransportMessage<BytesMut>, (), ()> for Agent {
    type Rout = ();
    type Wout = TransportMessage<BytesMut>;
    type Eout = Event;
    type Error = Error;
    type Time = Instant;

    fn handle_read(
        &mut self,
        msg: TransportMessage<BytesMut>,
    ) -> std::result::Result<(), Self::Error> {
        if let Some(local_index) = self
            .find_local_candidate_by_addr(msg.transport.local_addr, msg.transport.protocol)
        {
            self.handle_inbound_candidate_msg(
                local_index,
                &msg.message,
                msg.transport.peer_addr,
                msg.transport.local_addr,
            )
        } else {
            warn!(
                "[{}]: Discarded message, not a valid local candidate from {:?}:{}",
                self.get_name(),
                msg.transport.protocol,
                msg.transport.local_addr,
            );
            Err(Error::ErrUnhandledStunpacket)
        }
    }

    fn poll_read(&mut self) -> Option<Self::Rout> {
        None
    }

    fn handle_write(&mut self, _msg: ()) -> std::result::Result<(), Self::Error> {
        Ok(())
    }

    fn poll_write(&mut self) -> Option<Self::Wout> {
        self.transmits.pop_front()
    }

    fn handle_event(&mut self, _evt: ()) -> std::result::Result<(), Self::Error> {
        Ok(())
    }

    fn poll_event(&mut self) -> Option<Self::Eout> {
        self.events.pop_front()
    }

    fn handle_timeout(&mut self, now: Self::Time) -> std::result::Result<(), Self::Error> {
        self.contact(now);
        Ok(())
    }

    fn poll_timeout(&mut self) -> Option<Self::Time> {
        self.next_timeout()
    }

    fn close(&mut self) -> std::result::Result<(), Self::Error> {
        // Releasing the checklist flushes the in-flight checks before the
        // candidate registries go away.
        if let Some(checklist) = &mut self.checklist {
            checklist.conn_checks.clear();
        }
        self.checklist = None;
        self.valid_list.clear();
        self.check_list.clear();
        self.candidate_pairs.clear();
        self.local_candidates.clear();
        self.remote_candidates.clear();
        self.tcp_conns.clear();

        Ok(())
    }
}
