//! Flashpoint boss npc ids, Veteran and Master modes share an entry.

use super::encounters::BossEntry;

pub(super) static FLASHPOINT_BOSSES: &[BossEntry] = &[
    // The Black Talon
    BossEntry::new("The Black Talon", "Sergeant Boran", &[2509772729352192, 425970561449984]),
    BossEntry::new("The Black Talon", "GXR-5 Sabotage Droid", &[2509699714908160, 430896888938496]),
    BossEntry::new("The Black Talon", "Commander Ghulil", &[2509686830006272, 364857471795200]),
    BossEntry::new("The Black Talon", "Yadira Ban", &[2509777024319488, 365755119960064]),
    // The Esseles
    BossEntry::new("The Esseles", "Ironfist", &[2510769161764864, 649484954501120]),
    BossEntry::new("The Esseles", "Lieutenant Isric", &[2510773456732160, 649467774631936]),
    BossEntry::new("The Esseles", "ISS-7 Guardian Battledroid", &[2510777751699456, 653359015002112]),
    BossEntry::new("The Esseles", "Vokk", &[2510790636601344, 649472069599232]),
    // Directive 7
    BossEntry::new("Directive 7", "Detector", &[2512014702280704, 1626340906237952]),
    BossEntry::new("Directive 7", "Mentor Assasin Droids", &[2511954572738560, 2511958867705856, 2511963162673152, 746748783886336, 746753078853632, 746757373820928]),
    BossEntry::new("Directive 7", "Interrogator", &[2512053356986368, 1627981583745024]),
    BossEntry::new("Directive 7", "Bulwark", &[2511984637509632, 751348693860352]),
    BossEntry::new("Directive 7", "Assembler", &[2511976047575040, 1628604354002944]),
    BossEntry::new("Directive 7", "Replicator", &[2512109191561216, 1629334498443264]),
    BossEntry::new("Directive 7", "Mentor", &[2512100601626624, 2144842243112960]),
    // Boarding Party
    BossEntry::new("Boarding Party", "HXI-54 Juggernaut", &[2514497193377792, 745340034613248]),
    BossEntry::new("Boarding Party", "Sakan Do'nair", &[2514522963181568, 739816706670592]),
    BossEntry::new("Boarding Party", "Chief Engineer Kels", &[2514488603443200, 1004111814197248]),
    BossEntry::new("Boarding Party", "Officer Trio", &[2514527258148864, 2514531553116160, 2514535848083456, 739825296605184, 957597318381568, 957850721452032]),
    // The Foundry
    BossEntry::new("The Foundry", "Foundry Guardian", &[2514742006513664, 747710856560640]),
    BossEntry::new("The Foundry", "N4-10 Exterminator", &[2514729121611776, 1169322026205184]),
    BossEntry::new("The Foundry", "Burrower Matriarch", &[2514724826644480, 1148233736781824]),
    BossEntry::new("The Foundry", "HK-47", &[2514754891415552, 739833886539776]),
    BossEntry::new("The Foundry", "Revan", &[2514780661219328, 739846771441664]),
    // Hammer Station
    BossEntry::new("Hammer Station", "DN-314 Tunneler", &[3152170987814912, 2276525940408320]),
    BossEntry::new("Hammer Station", "Vorgan the Volcano", &[3152158102913024, 3152162397880320, 3152166692847616, 2286223976562688, 2286228271529984, 2286241156431872]),
    BossEntry::new("Hammer Station", "Battlelord Kreshan", &[3172554902601728, 3184361767698432]),
    // Athiss
    BossEntry::new("Athiss", "Professor Ley'arsha", &[3158072272879616, 1172496007036928]),
    BossEntry::new("Athiss", "The Beast of Vodal Kressh", &[3158119517519872, 2263129937412096]),
    BossEntry::new("Athiss", "Prophet of Vodal", &[3158123812487168, 1172951273570304]),
    // Mandalorian Raiders
    BossEntry::new("Mandalorian Raiders", "Braxx the Bloodhound", &[3158428755165184, 2438167034593280]),
    BossEntry::new("Mandalorian Raiders", "Republic Boarding Party", &[3158398690394112, 3158402985361408, 3158411575296000, 3158420165230592, 2442474886791168, 2442479181758464, 2442483476725760, 2442487771693056]),
    BossEntry::new("Mandalorian Raiders", "Imperial Boarding Party", &[3158265546407936, 3158394395426816, 3158407280328704, 3158415870263296, 2442457706921984, 2442462001889280, 2442466296856576, 2442470591823872]),
    BossEntry::new("Mandalorian Raiders", "Mavrix Varad", &[3172567787503616, 1276069143379968]),
    // Cademimu
    BossEntry::new("Cademimu", "Officer Xander", &[3210668442386432, 3210672737353728, 2504232221540352, 2504236516507648]),
    BossEntry::new("Cademimu", "Captain Grimyk", &[3210677032321024, 2503961638600704]),
    BossEntry::new("Cademimu", "General Ortol", &[3210659852451840, 2506547208912896]),
    // Taral V
    BossEntry::new("Taral V", "Captain Shivanek & Ripper", &[2513865833185280, 2513870128152576, 747891245187072, 748179007995904]),
    BossEntry::new("Taral V", "General Edikar", &[2531994890141696, 748187597930496]),
    // The Battle of Ilum
    BossEntry::new("The Battle of Ilum", "Gark the Indomitable", &[2511477831368704, 1675608476090368]),
    BossEntry::new("The Battle of Ilum", "Velasu Graege & Drinda-Zel", &[2511473536401408, 2511490716270592, 770938039697408, 770942334664704]),
    BossEntry::new("The Battle of Ilum", "Krel Thak", &[2511486421303296, 770946629632000]),
    BossEntry::new("The Battle of Ilum", "Darth Serevin", &[2511469241434112, 770925154795520]),
    // The False Emperor
    BossEntry::new("The False Emperor", "Tregg the Destroyer", &[2511761299210240, 1690314444111872]),
    BossEntry::new("The False Emperor", "Jindo Krey", &[2511709759602688, 770959514533888]),
    BossEntry::new("The False Emperor", "Prototype A-14 & Prototype B-16", &[2511718349537280, 2511726939471872, 1790202498514944, 1790206793482240]),
    BossEntry::new("The False Emperor", "HK-47", &[2511701169668096, 770955219566592]),
    BossEntry::new("The False Emperor", "Sith Entity", &[2511744119341056, 2158341325324288]),
    BossEntry::new("The False Emperor", "Darth Malgus", &[2511688284766208, 770963809501184]),
    // Kaon Under Siege
    BossEntry::new("Kaon Under Siege", "Rakghoul Behemoth", &[2765357643202560, 850519488724992]),
    BossEntry::new("Kaon Under Siege", "KR-82 Expulser", &[2765353348235264, 2765349053267968]),
    BossEntry::new("Kaon Under Siege", "Commander Lk'graagth", &[2762260971782144, 2762265266749440, 2762269561716736, 2762123532828672, 2762127827795968, 2762140712697856]),
    // Lost Island
    BossEntry::new("Lost Island", "Putrid Shaclaw", &[2898153737027584, 2838853123571712]),
    BossEntry::new("Lost Island", "LR-5 Sentinel Droid", &[2808620848775168]),
    BossEntry::new("Lost Island", "Transgenic Sample Seven", &[2857059489939456, 2800490475683840]),
    BossEntry::new("Lost Island", "Project Sav-Rak", &[2819585900281856, 2802144038092800]),
    BossEntry::new("Lost Island", "Transgenic Sample Eleven", &[2835799401824256, 2802509110312960]),
    BossEntry::new("Lost Island", "Doctor Lorrick", &[2819959562436608, 2838582540632064, 2794163988856832, 2809320928444416]),
    // Czerka Corporate Labs
    BossEntry::new("Czerka Corporate Labs", "CZ-8X Eradicator Droid", &[3279297724809216, 3245981663494144]),
    BossEntry::new("Czerka Corporate Labs", "Chief Zokar", &[3245985958461440]),
    BossEntry::new("Czerka Corporate Labs", "Rasmus Blys", &[3279306314743808, 3247210024140800]),
    // Czerka Core Meltdown
    BossEntry::new("Czerka Core Meltdown", "Enhanced Duneclaw", &[3279293429841920, 3247274448650240]),
    BossEntry::new("Czerka Core Meltdown", "Enhanced Vrblther", &[3247278743617536]),
    BossEntry::new("Czerka Core Meltdown", "The Vigilant", &[3279310609711104, 3247240088911872]),
    // Assault on Tython
    BossEntry::new("Assault on Tython", "Major Imos", &[3465471672188928, 3327405653491712]),
    BossEntry::new("Assault on Tython", "Major Travik", &[3331296893861888]),
    BossEntry::new("Assault on Tython", "Master Liam Dentiri", &[3465536096698368, 3325902414938112]),
    BossEntry::new("Assault on Tython", "Republic Commander", &[3485688083251200, 3493169916280832]),
    BossEntry::new("Assault on Tython", "Imperial Commander", &[3485696673185792, 3493174211248128]),
    BossEntry::new("Assault on Tython", "Lieutenant Kreshin", &[3465690715521024, 3328904597078016]),
    BossEntry::new("Assault on Tython", "Master Oric Traless", &[3465579046371328, 3327796495515648]),
    BossEntry::new("Assault on Tython", "Lord Goh", &[3465699305455616, 3325872350167040]),
    // Korriban Incursion
    BossEntry::new("Korriban Incursion", "Master Riilna", &[3468753027203072, 3333461557379072]),
    BossEntry::new("Korriban Incursion", "Lord Renning", &[3333474442280960]),
    BossEntry::new("Korriban Incursion", "Republic Commander", &[3484803319988224, 3493182801182720]),
    BossEntry::new("Korriban Incursion", "Imperial Commander", &[3484816204890112, 3493187096150016]),
    BossEntry::new("Korriban Incursion", "R-9XR", &[3468748732235776, 3329905324457984]),
    BossEntry::new("Korriban Incursion", "I5-T1", &[3468894761123840, 3334535299203072]),
    BossEntry::new("Korriban Incursion", "Commander Jensyn", &[3468757322170368, 3331339843534848]),
    BossEntry::new("Korriban Incursion", "Darth Soverus", &[3468911940993024, 3331378498240512]),
    // Depths of Manaan
    BossEntry::new("Depths of Manaan", "Sairisi", &[3505251659284480, 3350332188917760]),
    BossEntry::new("Depths of Manaan", "M2-AUX Foreman", &[3506896631758848]),
    BossEntry::new("Depths of Manaan", "Ortuno", &[3350327893950464]),
    BossEntry::new("Depths of Manaan", "Stivastin", &[3505268839153664, 3362925033029632]),
    // Legacy of the Rakata
    BossEntry::new("Legacy of the Rakata", "Savage War Beast and War Chief Rehkta", &[3491894310993920, 3491898605961216, 3370608729522176, 3372962371600384]),
    BossEntry::new("Legacy of the Rakata", "Commander Rand", &[3373078335717376]),
    BossEntry::new("Legacy of the Rakata", "Darth Arkous and Colonel Darok", &[3491881426092032, 3491890016026624, 3370613024489472, 3370617319456768]),
    // Blood Hunt
    BossEntry::new("Blood Hunt", "Kyramla Gemas'rugam", &[3507004005941248, 3400982738239488]),
    BossEntry::new("Blood Hunt", "Valk & Jos", &[3507029775745024, 3507034070712320, 3384193711079424, 3384198006046720]),
    BossEntry::new("Blood Hunt", "Shae Vizla", &[3407807441272832]),
    // Battle of Rishi
    BossEntry::new("Battle of Rishi", "Rarrook and Marko Ka", &[3533559788732416, 3533564083699712, 3369139850706944, 3369144145674240]),
    BossEntry::new("Battle of Rishi", "Master Obai and Lord Vodd", &[3533581263568896, 3533585558536192, 3369148440641536, 3369152735608832]),
    BossEntry::new("Battle of Rishi", "Shield Squadron Unit 1", &[3533594148470784]),
    // Maelstrom Prison
    BossEntry::new("Maelstrom Prison", "Colonel Daksh", &[2513608135147520]),
    BossEntry::new("Maelstrom Prison", "Lord Kancras", &[2513668264689664]),
    BossEntry::new("Maelstrom Prison", "Ancient Maelstrom Flayer", &[2513784228806656]),
    BossEntry::new("Maelstrom Prison", "Lord Vanithrast", &[2513672559656960]),
    BossEntry::new("Maelstrom Prison", "Grand Moff Kilran", &[2536938397499392]),
    // Shrine of Silence
    BossEntry::new("Shrine of Silence", "Corrupted Vorantikus", &[4702752965918720, 4702748670951424]),
    BossEntry::new("Shrine of Silence", "Voss Mystics", &[4705591939301376, 4705596234268672, 4705574759432192, 4705600529235968]),
    BossEntry::new("Shrine of Silence", "Kirba, the Forgotten", &[4702770145787904, 4702765850820608]),
    BossEntry::new("Shrine of Silence", "Nil-Uu", &[4699299812212736]),
    BossEntry::new("Shrine of Silence", "Soul Coil", &[4699119423586304]),
    BossEntry::new("Shrine of Silence", "The Curse", &[4705566169497600, 4705561874530304]),
];
