//! # Allocation Ordering Flows
//!
//! Drives qc-12-allocation-ordering through both of its entry points the
//! way a node does:
//!
//! 1. **Block assembly**: `remove_cycles` on a freshly built template
//! 2. **Block validation**: `topological_sort` on the assembled block
//!
//! Transactions are version-gated wire fixtures, so alias updates and
//! plain transfers share blocks with asset allocations.

#[cfg(test)]
mod tests {
    use crate::fixtures::{
        assemble, random_block, reversed_chain_block, VersionedDecoder, WireTransaction,
        ALLOCATION_TX_VERSION, STANDARD_TX_VERSION,
    };
    use qc_12_allocation_ordering::domain::invariants::{
        invariant_no_cycles, invariant_permutation, invariant_senders_precede_receivers,
        invariant_totals_exact,
    };
    use qc_12_allocation_ordering::{
        AllocationOrderingApi, AllocationOrderingService, Block, MemoryDiagnosticSink,
        OrderingConfig, OrderingError, PruneOutcome, SortOutcome,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn service(
        max_enumerated_circuits: usize,
    ) -> AllocationOrderingService<VersionedDecoder, MemoryDiagnosticSink> {
        let config =
            OrderingConfig::default().with_max_enumerated_circuits(max_enumerated_circuits);
        AllocationOrderingService::with_sink(VersionedDecoder, MemoryDiagnosticSink::new(), config)
            .unwrap()
    }

    fn txids(transactions: &[WireTransaction]) -> Vec<u64> {
        transactions.iter().map(|tx| tx.txid).collect()
    }

    /// Original position of each transaction of `reordered` within `original`
    fn original_positions(
        original: &[WireTransaction],
        reordered: &[WireTransaction],
    ) -> Vec<usize> {
        reordered
            .iter()
            .filter_map(|tx| original.iter().position(|o| o.txid == tx.txid))
            .collect()
    }

    // =============================================================================
    // BLOCK ASSEMBLY
    // =============================================================================

    #[test]
    fn test_assembly_prunes_circular_allocations() {
        let service = service(100_000);
        let (mut template, mut totals) = assemble(vec![
            WireTransaction::coinbase(),
            WireTransaction::allocation(1, "alice", &[("bob", 10)]),
            WireTransaction::allocation(2, "bob", &[("carol", 10)]),
            WireTransaction::transfer(3),
            WireTransaction::allocation(4, "carol", &[("alice", 10)]),
        ]);

        let outcome = service.remove_cycles(&mut template, &mut totals);

        assert_eq!(outcome.removed_positions(), &[4, 2, 1]);
        assert_eq!(outcome.cleared_vertices(), 3);
        assert_eq!(txids(&template.block.transactions), vec![0, 3]);
        assert_eq!(totals.tx_count, 2);
        assert!(invariant_totals_exact(&template, &totals));
    }

    #[test]
    fn test_assembly_keeps_funders_of_cycles() {
        // dave funds the alice/bob cycle but is not on it
        let service = service(100_000);
        let (mut template, mut totals) = assemble(vec![
            WireTransaction::coinbase(),
            WireTransaction::allocation(1, "dave", &[("alice", 5)]),
            WireTransaction::allocation(2, "alice", &[("bob", 5)]),
            WireTransaction::allocation(3, "bob", &[("alice", 5)]),
            WireTransaction::alias_update(4, "erin"),
        ]);

        service.remove_cycles(&mut template, &mut totals);

        assert_eq!(txids(&template.block.transactions), vec![0, 1, 4]);
        assert!(invariant_totals_exact(&template, &totals));
    }

    #[test]
    fn test_assembly_without_allocations_is_untouched() {
        let service = service(100_000);
        let (mut template, mut totals) = assemble(vec![
            WireTransaction::coinbase(),
            WireTransaction::transfer(1),
            WireTransaction::alias_update(2, "alice"),
        ]);
        let before = (template.clone(), totals);

        assert_eq!(
            service.remove_cycles(&mut template, &mut totals),
            PruneOutcome::NoChange
        );
        assert_eq!((template, totals), before);
    }

    #[test]
    fn test_circuit_budget_does_not_change_pruning() {
        for seed in 0..20 {
            let transactions = random_block(seed, 40, 6, 0.9);

            let (mut full, mut full_totals) = assemble(transactions.clone());
            let (mut limited, mut limited_totals) = assemble(transactions);

            let full_outcome = service(100_000).remove_cycles(&mut full, &mut full_totals);
            let limited_outcome = service(1).remove_cycles(&mut limited, &mut limited_totals);

            assert_eq!(full_outcome, limited_outcome, "seed {}", seed);
            assert_eq!(full.block, limited.block, "seed {}", seed);
            assert_eq!(full_totals, limited_totals, "seed {}", seed);
        }
    }

    // =============================================================================
    // BLOCK VALIDATION
    // =============================================================================

    #[test]
    fn test_validation_rejects_unpruned_cycle() {
        let service = service(100_000);
        let mut block = Block::new(vec![
            WireTransaction::coinbase(),
            WireTransaction::allocation(1, "alice", &[("bob", 1)]),
            WireTransaction::transfer(2),
            WireTransaction::allocation(3, "bob", &[("alice", 1)]),
        ]);
        let before = block.clone();

        let result = service.topological_sort(&mut block);

        assert!(matches!(result, Err(OrderingError::NotAcyclic { .. })));
        assert!(result.unwrap_err().is_ordering_invalid());
        assert_eq!(block, before);
    }

    #[test]
    fn test_validation_reverses_chain() {
        let service = service(100_000);
        let mut block = Block::new(reversed_chain_block(4));

        let outcome = service.topological_sort(&mut block).unwrap();

        assert!(matches!(outcome, SortOutcome::Reordered { .. }));
        // alias-0 funds alias-1, which was emitted last
        assert_eq!(txids(&block.transactions), vec![0, 4, 3, 2, 1]);
    }

    #[test]
    fn test_alias_updates_trail_allocations_in_block_order() {
        let service = service(100_000);
        let mut block = Block::new(vec![
            WireTransaction::coinbase(),
            WireTransaction::alias_update(1, "zed"),
            WireTransaction::allocation(2, "bob", &[("carol", 3)]),
            WireTransaction::transfer(3),
            WireTransaction::allocation(4, "alice", &[("bob", 3)]),
            WireTransaction::alias_update(5, "yan"),
        ]);

        service.topological_sort(&mut block).unwrap();

        assert_eq!(txids(&block.transactions), vec![0, 4, 2, 1, 3, 5]);
    }

    #[test]
    fn test_standard_version_allocation_ignored() {
        let service = service(100_000);
        let downgraded = WireTransaction {
            version: STANDARD_TX_VERSION,
            ..WireTransaction::allocation(1, "alice", &[("alice", 1)])
        };
        assert_ne!(downgraded.version, ALLOCATION_TX_VERSION);

        let mut block = Block::new(vec![WireTransaction::coinbase(), downgraded]);
        let before = block.clone();

        assert_eq!(
            service.topological_sort(&mut block),
            Ok(SortOutcome::NoDependencies)
        );
        assert_eq!(block, before);
    }

    // =============================================================================
    // ASSEMBLY THEN VALIDATION
    // =============================================================================

    #[test]
    fn test_assembled_random_blocks_always_validate() {
        let service = service(100_000);

        for seed in 0..50 {
            let (mut template, mut totals) = assemble(random_block(seed, 60, 8, 0.7));
            service.remove_cycles(&mut template, &mut totals);
            assert!(invariant_totals_exact(&template, &totals), "seed {}", seed);

            let assembled = template.block.transactions.clone();
            let mut block = template.block.clone();
            let result = service.topological_sort(&mut block);
            assert!(result.is_ok(), "seed {}: {:?}", seed, result);

            assert_eq!(block.transactions[0].txid, 0);
            assert!(invariant_permutation(&assembled, &block.transactions));

            if let Some(dag) = service.build_dag(&assembled) {
                assert!(invariant_no_cycles(&dag.graph), "seed {}", seed);
                let positions = original_positions(&assembled, &block.transactions);
                assert!(
                    invariant_senders_precede_receivers(&dag, &positions),
                    "seed {}",
                    seed
                );
            }
        }
    }

    #[test]
    fn test_diagnostics_follow_both_paths() {
        let service = service(100_000);
        let (mut template, mut totals) = assemble(vec![
            WireTransaction::coinbase(),
            WireTransaction::allocation(1, "alice", &[("bob", 1)]),
            WireTransaction::allocation(2, "bob", &[("alice", 1)]),
            WireTransaction::allocation(3, "carol", &[("dave", 1)]),
        ]);

        service.remove_cycles(&mut template, &mut totals);
        let mut block = template.block.clone();
        service.topological_sort(&mut block).unwrap();

        let sink = service.sink();
        assert!(sink.contains("found asset allocation from sender alice at position 1"));
        assert!(sink.contains("reversed outputs to remove 2"));
        assert!(sink.contains("topological ordering: carol -> dave"));
        assert!(sink.contains("sorted size 2 vs block size 2"));
    }
}
