//! Façade contract tests
//!
//! These tests define the stable caller-visible contract of the client
//! façade: sentinel mapping on failure, descriptor validation before any
//! transport interaction, output length write-back, and the identity
//! presented to the secure side.

#[cfg(test)]
mod tests {
    use crate::test_helpers::*;
    use mailbox_ipc::{ClientCallOp, InVec, OutVec, PSA_MAX_IOVEC};
    use ns_interface::{NsContextManager, SharedClientId};
    use psa_types::{ClientId, PsaStatus, ServiceId, VERSION_NONE};
    use sim_secure::{FaultPlan, MailboxEvent, TransportFault};
    use std::sync::Arc;

    #[test]
    fn test_framework_version_crosses_once() {
        let bridge = bridge();
        assert_eq!(bridge.framework_version(), 0x0101);
        assert_eq!(secure_side(&bridge).client_call_count(), 1);
    }

    #[test]
    fn test_service_version_query() {
        let bridge = bridge();
        assert_eq!(bridge.version(ECHO_SID), ECHO_VERSION);
        assert_eq!(bridge.version(ServiceId::new(0xDEAD)), VERSION_NONE);
    }

    #[test]
    fn test_connect_call_close_lifecycle() {
        let bridge = bridge();

        let handle = bridge.connect(ECHO_SID, 1);
        assert!(!handle.is_null());

        let input = b"ping";
        let mut buf = [0u8; 16];
        let inputs = [InVec::new(input)];
        let mut outputs = [OutVec::new(&mut buf)];
        let status = bridge.call(handle, 0, &inputs, &mut outputs);
        assert_eq!(status, PsaStatus::SUCCESS);
        assert_eq!(outputs[0].len(), 4);
        assert_eq!(outputs[0].written(), b"ping");

        bridge.close(handle);
        assert_eq!(secure_side(&bridge).connection_count(), 0);
        // Connect, call and close: one crossing each.
        assert_eq!(secure_side(&bridge).client_call_count(), 3);
    }

    #[test]
    fn test_lifecycle_works_without_scheduler() {
        // Direct-path dispatch must carry the same semantics.
        let bridge = bridge_with(false, Arc::new(SharedClientId::default()));
        let handle = bridge.connect(ECHO_SID, 1);
        assert!(!handle.is_null());
        bridge.close(handle);
        assert_eq!(secure_side(&bridge).connection_count(), 0);
    }

    #[test]
    fn test_connect_refusal_and_fault_both_yield_null() {
        let bridge = bridge();

        // In-band refusal: requested version newer than registered.
        assert!(bridge.connect(ECHO_SID, ECHO_VERSION + 1).is_null());

        // Transport fault on the connect crossing.
        secure_side(&bridge).set_fault_plan(
            FaultPlan::new().with_fault(TransportFault::FailOnOp {
                op: ClientCallOp::Connect,
            }),
        );
        assert!(bridge.connect(ECHO_SID, 1).is_null());
        assert_eq!(secure_side(&bridge).connection_count(), 0);
    }

    #[test]
    fn test_version_queries_fault_to_none() {
        let bridge = bridge();
        secure_side(&bridge)
            .set_fault_plan(FaultPlan::new().with_fault(TransportFault::FailNext { count: 2 }));
        assert_eq!(bridge.framework_version(), VERSION_NONE);
        assert_eq!(bridge.version(ECHO_SID), VERSION_NONE);
    }

    #[test]
    fn test_call_fault_maps_to_comm_error_sentinel() {
        let bridge = bridge();
        let handle = bridge.connect(ECHO_SID, 1);

        secure_side(&bridge).set_fault_plan(
            FaultPlan::new().with_fault(TransportFault::FailOnOp {
                op: ClientCallOp::Call,
            }),
        );
        let status = bridge.call(handle, 0, &[], &mut []);
        assert_eq!(status, PsaStatus::INTER_CORE_COMM_ERR);
    }

    #[test]
    fn test_oversized_lists_never_reach_transport() {
        let bridge = bridge();
        let before = secure_side(&bridge).client_call_count();

        let data = [0u8; 1];
        let too_many = [InVec::new(&data); PSA_MAX_IOVEC + 1];
        let handle = bridge.connect(ECHO_SID, 1);
        let status = bridge.call(handle, 0, &too_many, &mut []);
        assert_eq!(status, PsaStatus::PROGRAMMER_ERROR);
        // Only the connect crossed.
        assert_eq!(secure_side(&bridge).client_call_count(), before + 1);
    }

    #[test]
    fn test_call_accepts_maximum_descriptor_split() {
        let bridge = bridge();
        let handle = bridge.connect(ECHO_SID, 1);

        let (n_in, n_out) = max_split();
        let data = [0u8; 1];
        let inputs = vec![InVec::new(&data); n_in];
        let mut bufs = vec![[0u8; 4]; n_out];
        let mut outputs: Vec<OutVec<'_>> = bufs.iter_mut().map(|b| OutVec::new(b)).collect();

        let status = bridge.call(handle, 0, &inputs, &mut outputs);
        assert_eq!(status, PsaStatus::SUCCESS);
    }

    #[test]
    fn test_output_lengths_written_back_on_error_status() {
        let bridge = bridge();
        let sid = ServiceId::new(0x4000_0043);
        secure_side(&bridge).register_service(
            sid,
            1,
            Box::new(|_request_type, _inputs, outputs| {
                if let Some(output) = outputs.first_mut() {
                    output.write_from(b"ab");
                }
                PsaStatus::from_raw(-35)
            }),
        );
        let handle = bridge.connect(sid, 1);

        let mut buf = [0u8; 8];
        let mut outputs = [OutVec::new(&mut buf)];
        let status = bridge.call(handle, 0, &[], &mut outputs);
        assert!(status.is_error());
        // The per-slot length still reflects what the service wrote.
        assert_eq!(outputs[0].len(), 2);
        assert_eq!(outputs[0].written(), b"ab");
    }

    #[test]
    fn test_close_is_fire_and_forget_under_fault() {
        let bridge = bridge();
        let handle = bridge.connect(ECHO_SID, 1);

        secure_side(&bridge).set_fault_plan(
            FaultPlan::new().with_fault(TransportFault::FailOnOp {
                op: ClientCallOp::Close,
            }),
        );
        // No return value, no panic; the fault is swallowed.
        bridge.close(handle);

        let faulted = secure_side(&bridge)
            .audit()
            .iter()
            .any(|event| matches!(event, MailboxEvent::CallFaulted { .. }));
        assert!(faulted);
    }

    #[test]
    fn test_per_thread_identity_reaches_secure_side() {
        let manager = Arc::new(NsContextManager::new());
        let bridge = Arc::new(bridge_with(true, manager.clone()));

        manager.assign_current_thread(ClientId::new(-7));
        bridge.framework_version();

        let worker = {
            let manager = manager.clone();
            let bridge = bridge.clone();
            std::thread::spawn(move || {
                manager.assign_current_thread(ClientId::new(-8));
                bridge.framework_version();
            })
        };
        worker.join().unwrap();

        let clients: Vec<ClientId> = secure_side(&bridge)
            .audit()
            .iter()
            .filter_map(|event| match event {
                MailboxEvent::CallReceived { client, .. } => Some(*client),
                _ => None,
            })
            .collect();
        assert!(clients.contains(&ClientId::new(-7)));
        assert!(clients.contains(&ClientId::new(-8)));
    }

    #[test]
    fn test_unassigned_thread_presents_default_identity() {
        let manager = Arc::new(NsContextManager::new());
        let bridge = bridge_with(true, manager);
        bridge.framework_version();

        match &secure_side(&bridge).audit()[0] {
            MailboxEvent::CallReceived { client, .. } => {
                assert_eq!(*client, ClientId::DEFAULT);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
