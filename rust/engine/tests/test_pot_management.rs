use holdem_engine::pot::PotManager;

#[test]
fn heads_up_simple_side_pot() {
    let pm = PotManager::from_contributions(&[(0, 500, true), (1, 1_000, true)]);
    assert_eq!(pm.main_pot(), 1_000);
    assert_eq!(pm.side_pots().len(), 1);
    assert_eq!(pm.side_pots()[0].amount, 500);
    assert_eq!(pm.side_pots()[0].eligible, vec![1]);
}

#[test]
fn equal_stacks_no_side_pot() {
    let pm = PotManager::from_contributions(&[(0, 1_000, true), (1, 1_000, true)]);
    assert_eq!(pm.main_pot(), 2_000);
    assert!(pm.side_pots().is_empty());
}

#[test]
fn three_allins_form_three_tiers() {
    let pm =
        PotManager::from_contributions(&[(0, 1_000, true), (1, 3_000, true), (2, 5_000, true)]);
    // main: 1000*3, side 1: 2000*2, side 2: 2000*1
    assert_eq!(pm.pots.len(), 3);
    assert_eq!(pm.pots[0].amount, 3_000);
    assert_eq!(pm.pots[1].amount, 4_000);
    assert_eq!(pm.pots[2].amount, 2_000);
    assert_eq!(pm.pots[0].eligible, vec![0, 1, 2]);
    assert_eq!(pm.pots[1].eligible, vec![1, 2]);
    assert_eq!(pm.pots[2].eligible, vec![2]);
    assert_eq!(pm.total(), 9_000);
}

#[test]
fn folded_player_funds_but_cannot_win() {
    // seat 0 bet 100 then folded; 1 and 2 are all-in/called at 200
    let pm = PotManager::from_contributions(&[(0, 100, false), (1, 200, true), (2, 200, true)]);
    assert_eq!(pm.pots.len(), 2);
    assert_eq!(pm.pots[0].amount, 300);
    assert_eq!(pm.pots[1].amount, 200);
    for pot in &pm.pots {
        assert!(
            !pot.eligible.contains(&0),
            "folded seat must not be eligible"
        );
    }
    assert_eq!(pm.total(), 500);
}

#[test]
fn chips_are_always_conserved() {
    let contributions = [
        (0, 500, false),
        (1, 2_000, true),
        (2, 2_000, true),
        (3, 800, true),
    ];
    let pm = PotManager::from_contributions(&contributions);
    let total_bets: u32 = contributions.iter().map(|(_, bet, _)| *bet).sum();
    assert_eq!(pm.total(), total_bets, "chips must be conserved");
}

#[test]
fn award_splits_each_tier_among_its_winners() {
    let pm = PotManager::from_contributions(&[(0, 5_000, true), (1, 10_000, true)]);
    // short stack wins the main pot, the overbettor gets the side pot back
    let payouts = pm.award(&[vec![0], vec![1]]);
    assert_eq!(payouts.get(&0), Some(&10_000));
    assert_eq!(payouts.get(&1), Some(&5_000));
}

#[test]
fn split_pot_gives_the_odd_chip_to_the_first_seat() {
    let pm = PotManager::from_contributions(&[(0, 101, true), (1, 101, true), (2, 101, true)]);
    assert_eq!(pm.total(), 303);
    let payouts = pm.award(&[vec![0, 2]]);
    // 303 / 2 = 151 rem 1: first listed winner takes the remainder
    assert_eq!(payouts.get(&0), Some(&152));
    assert_eq!(payouts.get(&2), Some(&151));
}

#[test]
fn uncalled_overbet_rolls_back_to_its_owner() {
    // seat 1 bet 300 into players who could only cover 200
    let pm = PotManager::from_contributions(&[(0, 200, true), (1, 300, true)]);
    assert_eq!(pm.pots.len(), 2);
    assert_eq!(pm.pots[1].amount, 100);
    assert_eq!(pm.pots[1].eligible, vec![1]);
    // even if seat 0 shows the best hand, the overbet goes home
    let payouts = pm.award(&[vec![0], vec![1]]);
    assert_eq!(payouts.get(&0), Some(&400));
    assert_eq!(payouts.get(&1), Some(&100));
}

#[test]
fn dead_top_tier_merges_downward() {
    // the biggest bet belongs to a folded seat; its excess must not orphan
    let pm = PotManager::from_contributions(&[(0, 500, false), (1, 200, true), (2, 200, true)]);
    assert_eq!(pm.total(), 900);
    let payouts = pm.award(&[vec![1]]);
    let paid: u32 = payouts.values().sum();
    assert_eq!(paid, 900, "every chip must land somewhere");
}
