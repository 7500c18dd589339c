//! Operation boss npc ids, one entry per boss across all difficulties.

use super::encounters::BossEntry;

pub(super) static OPERATION_BOSSES: &[BossEntry] = &[
    // Eternity Vault
    BossEntry::new("Eternity Vault", "Annihilation Droid XRR-3", &[2017165750304768, 1779997656219648, 2034611907461120, 2034573252755456]),
    BossEntry::new("Eternity Vault", "Gharj", &[2016946706972672, 1783772932472832, 2034534598049792, 2034526008115200]),
    BossEntry::new("Eternity Vault", "Soa", &[2017170045272064, 1783790112342016, 2290085152161792, 2289823159156736]),
    // Karagga's Palace
    BossEntry::new("Karagga's Palace", "Bonethrasher", &[2624491305828352, 2271801476382720, 2624508485697536, 2624474125959168]),
    BossEntry::new("Karagga's Palace", "Jarg & Sorno", &[2760500035190784, 2760504330158080, 2739437515571200, 2739441810538496, 2760517215059968, 2760521510027264, 2760482855321600, 2760487150288896]),
    BossEntry::new("Karagga's Palace", "Foreman Crusher", &[2739888487137280, 2739875602235392, 2760693308719104, 2760637474144256]),
    BossEntry::new("Karagga's Palace", "G4-B3 Heavy Fabricator", &[2760371186171904, 2747344550363136, 2760375481139200, 2748401112317952]),
    BossEntry::new("Karagga's Palace", "Karagga the Unyielding", &[2761200114860032, 2740043105959936, 2761208704794624, 2761191524925440]),
    // Explosive Conflict
    BossEntry::new("Explosive Conflict", "Zorn & Toth", &[2860766046715904, 2860770341683200, 2788331423268864, 2788335718236160, 2861384522006528, 2861388816973824, 2857544821243904, 2857549116211200]),
    BossEntry::new("Explosive Conflict", "Firebrand & Stormcaller", &[2876459857215488, 2876464152182784, 2808827007205376, 2808831302172672, 2876481332051968, 2876485627019264, 2876434087411712, 2876438382379008]),
    BossEntry::new("Explosive Conflict", "Colonel Vorgath", &[2854156092047360, 2854224811524096, 2783478110224384, 2848692893646848, 2854160387014656, 2854229106491392, 2854117437341696, 2854151797080064]),
    BossEntry::new("Explosive Conflict", "Warlord Kephess", &[2876550051528704, 2876562936430592, 2794185463693312, 2800357331697664, 2876588706234368, 2876593001201664, 2876528576692224, 2876532871659520]),
    // Terror From Beyond
    BossEntry::new("Terror From Beyond", "The Writhing Horror", &[3010428477112320, 2938874321960960, 3010432772079616, 3010424182145024]),
    BossEntry::new("Terror From Beyond", "Dreadful Entity", &[3057806261354496]),
    BossEntry::new("Terror From Beyond", "The Dread Guard", &[3013374824677376, 3013379119644672, 3013387709579264, 2938002443599872, 2938006738567168, 2938011033534464, 3013409184415744, 3013413479383040, 3013417774350336, 3013327580037120, 3013331875004416, 3013336169971712]),
    BossEntry::new("Terror From Beyond", "Operator IX", &[2994850630729728, 2942606648541184, 2994859220664320, 2994837745827840]),
    BossEntry::new("Terror From Beyond", "Kephess the Undying", &[3013134306508800, 2937620191510528, 3013138601476096, 3013121421606912]),
    BossEntry::new("Terror From Beyond", "The Terror From Beyond", &[3025224639447040, 3025237524348928, 3025263294152704, 3025276179054592, 3025289063956480, 2938887206862848, 2938891501830144, 2938895796797440, 2978340776443904, 2988545618739200, 3025228934414336, 3025241819316224, 3025267589120000, 3025280474021888, 3025293358923776, 3025220344479744, 3025233229381632, 3025258999185408, 3025271884087296, 3025284768989184]),
    // Scum and Villainy
    BossEntry::new("Scum and Villainy", "Dash'Roode", &[3153571147153408, 3058837053505536, 3153575442120704, 3153558262251520]),
    BossEntry::new("Scum and Villainy", "Titan 6", &[3152463045591040, 3016450021261312, 3152467340558336, 3152458750623744]),
    BossEntry::new("Scum and Villainy", "Hateful Entity", &[3264737785675776]),
    BossEntry::new("Scum and Villainy", "Thrasher", &[3154567579566080, 3045819007631360, 3154571874533376, 3154563284598784]),
    BossEntry::new("Scum and Villainy", "Operations Chief", &[3157552581836800, 3141940375715840, 3157556876804096, 3157548286869504]),
    BossEntry::new("Scum and Villainy", "Olok the Shadow", &[3154674953748480, 3016445726294016, 3154679248715776, 3154662068846592]),
    BossEntry::new("Scum and Villainy", "Cartel Warlords", &[3054400352288768, 3054404647256064, 3054408942223360, 3156899746807808, 3054413237190656, 3156904041775104, 3156895451840512]),
    BossEntry::new("Scum and Villainy", "Dread Master Styrak", &[3067057620910080, 3152441570754560, 3225679353085952, 3066945951760384, 3152445865721856, 3152407211016192]),
    // The Dread Fortress
    BossEntry::new("The Dread Fortress", "Nefra, Who Bars the Way", &[3303036009054208, 3266533082005504, 3303040304021504, 3303031714086912]),
    BossEntry::new("The Dread Fortress", "Gate Commander Draxus", &[3303401081274368, 3273924720721920, 3303405376241664, 3303392491339776]),
    BossEntry::new("The Dread Fortress", "Grob'thok, Who Feeds the Forge", &[3302563562651648, 3273929015689216, 3302567857618944, 3302559267684352]),
    BossEntry::new("The Dread Fortress", "Corruptor Zero", &[3303542815195136, 3273933310656512, 3303551405129728, 3303534225260544]),
    BossEntry::with_kill_targets(
        "The Dread Fortress",
        "Dread Master Brontes",
        &[3275625527771136, 3277721471811584, 3303538520227840, 3273937605623808, 3303547110162432, 3303529930293248],
        &[3303538520227840, 3273937605623808, 3303547110162432, 3303529930293248],
    ),
    // The Dread Palace
    BossEntry::new("The Dread Palace", "Dread Master Bestia", &[3273941900591104]),
    BossEntry::new("The Dread Palace", "Dread Master Tyrans", &[3273954785492992]),
    BossEntry::with_kill_targets(
        "The Dread Palace",
        "Dread Master Calphayus",
        &[3273946195558400, 3284949901770752, 3284954196738048, 3312991743246336, 3349812497874944, 3312983153311744, 3312996038213632, 3312987448279040],
        &[3312991743246336, 3312983153311744, 3312996038213632, 3312987448279040],
    ),
    BossEntry::new("The Dread Palace", "Dread Master Raptus", &[3303555700097024, 3273950490525696, 3303559995064320, 3302902865068032]),
    // The Ravagers
    BossEntry::new("The Ravagers", "Sparky", &[3458114393210880, 3367555007774720, 3458122983145472, 3458110098243584]),
    BossEntry::new("The Ravagers", "Quartermaster Bulo", &[3468701487595520, 3371446248144896, 3468697192628224, 3468705782562816]),
    BossEntry::new("The Ravagers", "Torque", &[3468714372497408, 3397005598523392, 3468718667464704, 3468710077530112]),
    BossEntry::with_kill_targets(
        "The Ravagers",
        "Master & Blaster",
        &[3391100018491392, 3462181727240192, 3391095723524096, 3462186022207488, 3458148752949248],
        &[3462181727240192, 3391095723524096, 3462186022207488, 3458148752949248],
    ),
    BossEntry::with_kill_targets(
        "The Ravagers",
        "Coratanni",
        &[3371437658210304, 3371441953177600, 3468735847333888, 3443983950807040, 3468740142301184, 3468731552366592],
        &[3468735847333888, 3443983950807040, 3468740142301184, 3468731552366592],
    ),
    // Temple of Sacrifice
    BossEntry::new("Temple of Sacrifice", "Malaphar the Savage", &[3469281308180480, 3431245077807104, 3469285603147776, 3469277013213184]),
    BossEntry::new("Temple of Sacrifice", "Sword Squadron", &[3447789291831296, 3468770207072256, 3447784996864000, 3468774502039552, 3468765912104960]),
    BossEntry::new("Temple of Sacrifice", "The Underlurker", &[3462267626586112, 3411402328899584, 3462271921553408, 3462263331618816]),
    BossEntry::new("Temple of Sacrifice", "Revanite Commanders", &[3456890327531520, 3456894622498816, 3456898917466112, 3483029498494976, 3482806160195584, 3483033793462272, 3483025203527680]),
    BossEntry::with_kill_targets(
        "Temple of Sacrifice",
        "Revan",
        &[3431605855059968, 3440805675008000, 3444310368321536, 3447583133401088],
        &[3440805675008000, 3444310368321536, 3447583133401088],
    ),
    // The Gods from the Machine
    BossEntry::new("The Gods from the Machine", "TYTH", &[4078419339902976, 4078427929837568, 4078415044935680, 4078423634870272]),
    BossEntry::new("The Gods from the Machine", "Aivela and Esne", &[4088525397950464, 4088538282852352, 4101564918661120]),
    BossEntry::new("The Gods from the Machine", "NAHUT", &[4122953855795200, 4108011664572416, 4122958150762496, 4122949560827904]),
    BossEntry::with_kill_targets(
        "The Gods from the Machine",
        "SCYVA",
        &[4108140513591296, 4126527268585472, 4158791062913024, 4126587398127616, 4158859782389760],
        &[4158791062913024, 4126587398127616, 4158859782389760],
    ),
    BossEntry::with_kill_targets(
        "The Gods from the Machine",
        "IZAX",
        &[4108097563918336, 4163128979881984, 4163133274849280],
        &[4163128979881984, 4163133274849280],
    ),
    // Dxun
    BossEntry::new("Dxun", "Red", &[4246176467517440, 4330233272467456]),
    BossEntry::with_kill_targets(
        "Dxun",
        "Holding Pens I",
        &[4245686841245696, 4340618503389184, 4340614208421888],
        &[4340618503389184, 4340614208421888],
    ),
    BossEntry::with_kill_targets(
        "Dxun",
        "Holding Pens II",
        &[4245686841245696, 4330082948612096, 4330061473775616],
        &[4330082948612096, 4330061473775616],
    ),
    BossEntry::new("Dxun", "Trandosians", &[4245970309087232, 4245978899021824, 4245983193989120, 4245987488956416]),
    BossEntry::with_kill_targets(
        "Dxun",
        "Huntmaster",
        &[4265104388390912, 4281661487316992, 4330237567434752],
        &[4281661487316992, 4330237567434752],
    ),
    BossEntry::new("Dxun", "Apex Vanguard", &[4282872668094464, 4350020186800128]),
    // R4
    BossEntry::new("R4", "IP-CPT", &[4467247024177152, 4480196350574592, 4480200645541888, 4494653210492928]),
    BossEntry::new("R4", "Watchdog", &[4466177577320448, 4494700455133184]),
    BossEntry::new("R4", "Lord Kanoth", &[4466190462222336, 4494876548792320]),
    BossEntry::new("R4", "Lady Dominique", &[4466199052156928, 4488524292161536, 4608014577303552]),
];
