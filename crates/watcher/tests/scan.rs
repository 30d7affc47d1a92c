//! Integration tests of the block assembly for the L1 scanner.
#![cfg(feature = "test-utils")]

use alloy_primitives::{address, bytes, keccak256, Address, Bytes, B256, U256};
use alloy_sol_types::SolCall;
use zkevm_l1::abi::{
    calls::{
        forceBatchCall, sequenceBatches_0Call, sequenceForceBatchesCall, BatchData,
        ForcedBatchData,
    },
    logs::{
        ForceBatch, SequenceBatches, SequenceForceBatches, UpdateGlobalExitRoot,
        UpdateZkEVMVersion, VerifyBatches, VerifyBatchesTrustedAggregator,
    },
};
use zkevm_l1_watcher::{
    test_utils::{chain, log},
    BoundaryBlockPolicy, DecodeError, EthRequestError, L1Scanner, L1ScannerConfig,
    L1ScannerError, TrackedContracts,
};
use zkevm_providers::test_utils::MockL1Source;
use zkevm_sync_primitives::{EventKind, L1Transaction, OrderEntry};

const ROLLUP: Address = address!("0x0000000000000000000000000000000000000001");
const GER_MANAGER: Address = address!("0x0000000000000000000000000000000000000002");
const BRIDGE: Address = address!("0x0000000000000000000000000000000000000003");
const SEQUENCER: Address = address!("0x00000000000000000000000000000000000000aa");

fn contracts() -> TrackedContracts {
    TrackedContracts {
        rollup: ROLLUP,
        global_exit_root_manager: GER_MANAGER,
        bridge: BRIDGE,
        data_committee: None,
    }
}

fn scanner(source: MockL1Source) -> L1Scanner<MockL1Source> {
    L1Scanner::new(source, L1ScannerConfig::new(contracts()))
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn entry(kind: EventKind, position: usize, index: usize) -> OrderEntry {
    OrderEntry { kind, position, index }
}

#[tokio::test]
async fn test_should_redeem_forced_batch_across_blocks() -> eyre::Result<()> {
    init_tracing();

    // Given
    let headers = chain(100, 4);
    let raw_txs = bytes!("0xf86b8085");
    let forced = ForceBatch {
        forceBatchNum: 1,
        lastGlobalExitRoot: B256::repeat_byte(7),
        sequencer: SEQUENCER,
        transactions: raw_txs.clone(),
    };
    let sequence_tx = L1Transaction {
        hash: B256::repeat_byte(0x44),
        from: SEQUENCER,
        input: sequenceBatches_0Call {
            batches: vec![
                BatchData {
                    transactions: bytes!("0x01"),
                    globalExitRoot: B256::ZERO,
                    timestamp: headers[3].timestamp - 5,
                    minForcedTimestamp: 0,
                },
                BatchData {
                    transactions: raw_txs.clone(),
                    globalExitRoot: B256::repeat_byte(7),
                    timestamp: headers[3].timestamp,
                    minForcedTimestamp: 1,
                },
            ],
            l2Coinbase: SEQUENCER,
        }
        .abi_encode()
        .into(),
    };
    let logs = [
        log(ROLLUP, &forced, &headers[1], 0, B256::repeat_byte(0x22)),
        log(ROLLUP, &SequenceBatches { numBatch: 11 }, &headers[3], 0, sequence_tx.hash),
    ];
    let source = MockL1Source::new(headers.clone())
        .with_logs(logs)
        .with_transactions([sequence_tx.clone()]);

    // When
    let info = scanner(source).scan(100, Some(103)).await?;

    // Then
    let numbers: Vec<_> = info.blocks.iter().map(|block| block.number).collect();
    assert_eq!(numbers, vec![101, 103]);
    assert_eq!(info.order_of(&headers[3].hash), &[entry(EventKind::SequenceBatches, 0, 0)]);

    let forced_batch = &info.blocks[0].forced_batches[0];
    assert_eq!(forced_batch.forced_at, headers[1].timestamp);
    assert_eq!(forced_batch.raw_txs_data, raw_txs);

    let sequenced = &info.blocks[1].sequenced_batches[0];
    assert_eq!(sequenced.iter().map(|b| b.batch_number).collect::<Vec<_>>(), vec![10, 11]);
    assert_eq!(sequenced[0].data.min_forced_timestamp, 0);
    assert_eq!(sequenced[1].data.min_forced_timestamp, headers[1].timestamp);
    assert_eq!(sequenced[1].data.transactions_hash, keccak256(&raw_txs));
    assert_eq!(sequenced[1].metadata.sequencer, SEQUENCER);
    assert_eq!(sequenced[1].tx_hash, sequence_tx.hash);

    Ok(())
}

#[tokio::test]
async fn test_should_preserve_intra_block_order() -> eyre::Result<()> {
    // Given
    let headers = chain(10, 1);
    let header = &headers[0];
    let tx = B256::repeat_byte(1);
    let ger = |byte| UpdateGlobalExitRoot {
        mainnetExitRoot: B256::repeat_byte(byte),
        rollupExitRoot: B256::ZERO,
    };
    let verify = VerifyBatches {
        numBatch: 3,
        stateRoot: B256::repeat_byte(3),
        aggregator: SEQUENCER,
    };
    let trusted = VerifyBatchesTrustedAggregator {
        numBatch: 4,
        stateRoot: B256::repeat_byte(4),
        aggregator: SEQUENCER,
    };
    let fork = UpdateZkEVMVersion { numBatch: 4, forkID: 2, version: "v2".into() };

    // Logs are returned out of order and interleaved with bridge logs.
    let logs = [
        log(GER_MANAGER, &ger(2), header, 5, tx),
        log(ROLLUP, &fork, header, 4, tx),
        log(BRIDGE, &ger(9), header, 3, tx),
        log(ROLLUP, &trusted, header, 2, tx),
        log(ROLLUP, &verify, header, 1, tx),
        log(GER_MANAGER, &ger(1), header, 0, tx),
    ];
    let source = MockL1Source::new(headers.clone()).with_logs(logs);

    // When
    let info = scanner(source).scan(10, Some(10)).await?;

    // Then
    assert_eq!(info.blocks.len(), 1);
    let block = &info.blocks[0];
    assert_eq!(
        info.order_of(&header.hash),
        &[
            entry(EventKind::GlobalExitRoot, 0, 0),
            entry(EventKind::VerifyBatches, 1, 0),
            entry(EventKind::TrustedVerifyBatches, 2, 1),
            entry(EventKind::ForkId, 3, 0),
            entry(EventKind::GlobalExitRoot, 4, 1),
        ]
    );
    assert_eq!(block.global_exit_roots[0].mainnet_exit_root, B256::repeat_byte(1));
    assert_eq!(block.global_exit_roots[1].mainnet_exit_root, B256::repeat_byte(2));
    assert_eq!(block.global_exit_roots[0].timestamp, header.timestamp);
    assert!(!block.verified_batches[0].trusted);
    assert!(block.verified_batches[1].trusted);
    assert_eq!(block.fork_ids[0].log_index, 4);
    assert_eq!(block.fork_ids[0].first_batch_number(), 5);

    Ok(())
}

#[tokio::test]
async fn test_should_apply_boundary_policy() -> eyre::Result<()> {
    // Given
    let headers = chain(20, 3);
    let ger = UpdateGlobalExitRoot { mainnetExitRoot: B256::ZERO, rollupExitRoot: B256::ZERO };
    let logs = [log(GER_MANAGER, &ger, &headers[0], 0, B256::ZERO)];

    // When
    let omit = scanner(MockL1Source::new(headers.clone()).with_logs(logs.clone()))
        .scan(20, Some(22))
        .await?;
    let mut config = L1ScannerConfig::new(contracts());
    config.boundary_policy = BoundaryBlockPolicy::IncludeLast;
    let include = L1Scanner::new(MockL1Source::new(headers.clone()).with_logs(logs), config)
        .scan(20, Some(22))
        .await?;

    // Then
    assert_eq!(omit.blocks.iter().map(|b| b.number).collect::<Vec<_>>(), vec![20]);
    assert_eq!(include.blocks.iter().map(|b| b.number).collect::<Vec<_>>(), vec![20, 22]);

    let last = &include.blocks[1];
    assert!(last.is_empty());
    assert_eq!(last.hash, headers[2].hash);
    assert_eq!(last.parent_hash, headers[1].hash);
    assert!(include.order_of(&last.hash).is_empty());

    Ok(())
}

#[tokio::test]
async fn test_should_redeem_force_sequenced_batch() -> eyre::Result<()> {
    // Given
    let headers = chain(50, 2);
    let raw_txs = bytes!("0xdeadbeef");
    let forced = ForceBatch {
        forceBatchNum: 8,
        lastGlobalExitRoot: B256::ZERO,
        sequencer: SEQUENCER,
        transactions: Bytes::new(),
    };
    let force_tx = L1Transaction {
        hash: B256::repeat_byte(0x10),
        from: SEQUENCER,
        input: forceBatchCall { transactions: raw_txs.clone(), maticAmount: U256::from(1) }
            .abi_encode()
            .into(),
    };
    let sequence_tx = L1Transaction {
        hash: B256::repeat_byte(0x11),
        from: SEQUENCER,
        input: sequenceForceBatchesCall {
            batches: vec![ForcedBatchData {
                transactions: raw_txs.clone(),
                globalExitRoot: B256::ZERO,
                minForcedTimestamp: 0,
            }],
        }
        .abi_encode()
        .into(),
    };
    let logs = [
        log(ROLLUP, &forced, &headers[0], 0, force_tx.hash),
        log(ROLLUP, &SequenceForceBatches { numBatch: 21 }, &headers[1], 0, sequence_tx.hash),
    ];
    let source = MockL1Source::new(headers.clone())
        .with_logs(logs)
        .with_transactions([force_tx, sequence_tx.clone()]);

    // When
    let info = scanner(source).scan(50, None).await?;

    // Then
    assert_eq!(info.blocks[0].forced_batches[0].raw_txs_data, raw_txs);
    assert_eq!(info.blocks[0].forced_batches[0].forced_batch_number, 8);

    let sequenced = &info.blocks[1].sequenced_force_batches[0][0];
    assert_eq!(sequenced.batch_number, 21);
    assert_eq!(sequenced.min_forced_timestamp, headers[0].timestamp);
    assert_eq!(sequenced.timestamp, headers[1].timestamp);
    assert_eq!(sequenced.coinbase, SEQUENCER);
    assert_eq!(sequenced.tx_hash, sequence_tx.hash);

    Ok(())
}

#[tokio::test]
async fn test_should_fallback_to_embedded_min_forced_timestamp() -> eyre::Result<()> {
    // Given
    let headers = chain(60, 1);
    let sequence_tx = L1Transaction {
        hash: B256::repeat_byte(0x12),
        from: SEQUENCER,
        input: sequenceBatches_0Call {
            batches: vec![BatchData {
                transactions: bytes!("0x02"),
                globalExitRoot: B256::ZERO,
                timestamp: 1,
                minForcedTimestamp: 1234,
            }],
            l2Coinbase: Address::ZERO,
        }
        .abi_encode()
        .into(),
    };
    let logs = [log(ROLLUP, &SequenceBatches { numBatch: 1 }, &headers[0], 0, sequence_tx.hash)];
    let source = MockL1Source::new(headers).with_logs(logs).with_transactions([sequence_tx]);

    // When
    let info = scanner(source).scan(60, Some(60)).await?;

    // Then
    assert_eq!(info.blocks[0].sequenced_batches[0][0].data.min_forced_timestamp, 1234);

    Ok(())
}

#[tokio::test]
async fn test_should_query_logs_in_pages() -> eyre::Result<()> {
    // Given
    let headers = chain(0, 10);
    let ger = UpdateGlobalExitRoot { mainnetExitRoot: B256::ZERO, rollupExitRoot: B256::ZERO };
    let logs: Vec<_> =
        headers.iter().map(|header| log(GER_MANAGER, &ger, header, 0, B256::ZERO)).collect();
    let mut config = L1ScannerConfig::new(contracts());
    config.log_query_block_range = 3;
    let scanner = L1Scanner::new(MockL1Source::new(headers).with_logs(logs), config);

    // When
    let info = scanner.scan(0, Some(9)).await?;

    // Then
    assert_eq!(info.blocks.len(), 10);
    assert!(info.blocks.windows(2).all(|pair| pair[0].number < pair[1].number));
    assert_eq!(scanner.source().log_queries.load(std::sync::atomic::Ordering::Relaxed), 4);

    Ok(())
}

#[tokio::test]
async fn test_should_fail_on_invalid_range() {
    let scanner = scanner(MockL1Source::new(chain(0, 2)));
    let err = scanner.scan(5, Some(4)).await.unwrap_err();
    assert!(matches!(err, L1ScannerError::InvalidRange { from: 5, to: 4 }));
}

#[tokio::test]
async fn test_should_fail_on_unavailable_source() {
    let scanner = scanner(MockL1Source::new(chain(0, 2)).unavailable());
    let err = scanner.scan(0, Some(1)).await.unwrap_err();
    assert!(matches!(err, L1ScannerError::Source(_)));
}

#[tokio::test]
async fn test_should_fail_on_reorged_block() {
    // Given
    let headers = chain(30, 2);
    let mut reorged = headers[1];
    reorged.hash = B256::repeat_byte(0xff);
    let ger = UpdateGlobalExitRoot { mainnetExitRoot: B256::ZERO, rollupExitRoot: B256::ZERO };
    let logs = [log(GER_MANAGER, &ger, &reorged, 0, B256::ZERO)];

    // When
    let err = scanner(MockL1Source::new(headers).with_logs(logs)).scan(30, Some(31)).await;

    // Then
    assert!(matches!(
        err,
        Err(L1ScannerError::EthRequest(EthRequestError::BlockHashMismatch { number: 31, .. }))
    ));
}

#[tokio::test]
async fn test_should_fail_on_forced_batch_gap() {
    // Given
    let headers = chain(40, 1);
    let forced = |number| ForceBatch {
        forceBatchNum: number,
        lastGlobalExitRoot: B256::ZERO,
        sequencer: SEQUENCER,
        transactions: bytes!("0x01"),
    };
    let logs = [
        log(ROLLUP, &forced(1), &headers[0], 0, B256::ZERO),
        log(ROLLUP, &forced(3), &headers[0], 1, B256::ZERO),
    ];

    // When
    let err = scanner(MockL1Source::new(headers).with_logs(logs)).scan(40, Some(40)).await;

    // Then
    assert!(matches!(
        err,
        Err(L1ScannerError::Decode(DecodeError::NonSequentialForcedBatch { expected: 2, got: 3 }))
    ));
}

#[tokio::test]
async fn test_should_fail_on_unknown_sequence_selector() {
    // Given
    let headers = chain(70, 1);
    let tx = L1Transaction {
        hash: B256::repeat_byte(0x13),
        from: SEQUENCER,
        input: bytes!("0xdeadbeef00"),
    };
    let logs = [log(ROLLUP, &SequenceBatches { numBatch: 1 }, &headers[0], 0, tx.hash)];
    let source = MockL1Source::new(headers).with_logs(logs).with_transactions([tx]);

    // When
    let err = scanner(source).scan(70, Some(70)).await;

    // Then
    assert!(matches!(
        err,
        Err(L1ScannerError::Decode(DecodeError::UnknownCallSelector {
            kind: EventKind::SequenceBatches,
            ..
        }))
    ));
}

#[tokio::test]
async fn test_should_scan_fork_ids() -> eyre::Result<()> {
    // Given
    let headers = chain(0, 6);
    let genesis = UpdateZkEVMVersion { numBatch: 0, forkID: 1, version: "v1".into() };
    let upgrade = UpdateZkEVMVersion { numBatch: 49, forkID: 2, version: "v2".into() };
    let ger = UpdateGlobalExitRoot { mainnetExitRoot: B256::ZERO, rollupExitRoot: B256::ZERO };
    let logs = [
        log(ROLLUP, &upgrade, &headers[4], 1, B256::ZERO),
        log(GER_MANAGER, &ger, &headers[2], 0, B256::ZERO),
        log(ROLLUP, &genesis, &headers[0], 0, B256::ZERO),
    ];
    let scanner = scanner(MockL1Source::new(headers).with_logs(logs));

    // When
    let forks = scanner.scan_fork_ids(0, 5, 2).await?;

    // Then
    assert_eq!(forks.len(), 2);
    assert_eq!((forks[0].block_number, forks[0].fork_id), (0, 1));
    assert_eq!((forks[1].block_number, forks[1].log_index, forks[1].fork_id), (4, 1, 2));
    assert_eq!(forks[1].first_batch_number(), 50);
    assert_eq!(scanner.source().log_queries.load(std::sync::atomic::Ordering::Relaxed), 3);

    Ok(())
}

#[tokio::test]
async fn test_should_fetch_shared_transaction_once() -> eyre::Result<()> {
    // Given
    let headers = chain(80, 1);
    let tx = L1Transaction {
        hash: B256::repeat_byte(0x14),
        from: SEQUENCER,
        input: forceBatchCall { transactions: bytes!("0x0a"), maticAmount: U256::ZERO }
            .abi_encode()
            .into(),
    };
    let forced = |number| ForceBatch {
        forceBatchNum: number,
        lastGlobalExitRoot: B256::ZERO,
        sequencer: SEQUENCER,
        transactions: Bytes::new(),
    };
    let logs = [
        log(ROLLUP, &forced(1), &headers[0], 0, tx.hash),
        log(ROLLUP, &forced(2), &headers[0], 1, tx.hash),
    ];
    let scanner = scanner(MockL1Source::new(headers).with_logs(logs).with_transactions([tx]));

    // When
    let info = scanner.scan(80, Some(80)).await?;

    // Then
    assert_eq!(info.blocks[0].forced_batches.len(), 2);
    assert_eq!(scanner.source().transaction_queries.load(std::sync::atomic::Ordering::Relaxed), 1);

    Ok(())
}
